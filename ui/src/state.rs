use serde::Serialize;

use crate::model::{CreatePayload, Item, UpdatePayload};

/// The edit-or-create form. All four fields are free text, bound to inputs
/// as-is; trimming and numeric coercion happen only at submit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemForm {
    pub prodname: String,
    pub qty: String,
    pub price: String,
    pub status: String,
}

impl ItemForm {
    /// Fill the form from an item, verbatim, for the edit flow.
    pub fn from_item(item: &Item) -> Self {
        Self {
            prodname: item.prodname.clone().unwrap_or_default(),
            qty: item.qty.map(|n| n.to_string()).unwrap_or_default(),
            price: item.price.map(|n| n.to_string()).unwrap_or_default(),
            status: item.status.clone().unwrap_or_default(),
        }
    }

    /// Coerce the form into a create body: text trimmed, numerics parsed.
    /// An empty or unparseable numeric field is sent as absent.
    pub fn to_create_payload(&self) -> CreatePayload {
        CreatePayload {
            prodname: Some(self.prodname.trim().to_string()),
            qty: self.qty.trim().parse().ok(),
            price: self.price.trim().parse().ok(),
            status: Some(self.status.trim().to_string()),
        }
    }

    /// Coerce the form into an update body for the given id.
    pub fn to_update_payload(&self, id: &str) -> UpdatePayload {
        let create = self.to_create_payload();
        UpdatePayload {
            id: id.to_string(),
            prodname: create.prodname,
            qty: create.qty,
            price: create.price,
            status: create.status,
        }
    }
}

/// Full client state: the list, the in-flight flag, the persistent error
/// banner, and the form with its edit target.
///
/// Serializable so a rendering layer can snapshot it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    /// Current full item list, replaced wholesale on every refresh.
    pub items: Vec<Item>,
    /// True while a list load is in flight (refresh button disables on it).
    pub loading: bool,
    /// Banner text; empty means no banner. Replaced, never appended.
    pub error: String,
    /// The single edit-or-create form.
    pub form: ItemForm,
    /// Id of the item being edited; None means create mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_at_submit() {
        let form = ItemForm {
            prodname: "  Widget ".into(),
            qty: " 12 ".into(),
            price: "2.5".into(),
            status: " S".into(),
        };
        let payload = form.to_create_payload();
        assert_eq!(payload.prodname.as_deref(), Some("Widget"));
        assert_eq!(payload.qty, Some(12));
        assert_eq!(payload.price, Some(2.5));
        assert_eq!(payload.status.as_deref(), Some("S"));
    }

    #[test]
    fn empty_or_garbage_numerics_become_absent() {
        let form = ItemForm {
            qty: "".into(),
            price: "abc".into(),
            ..ItemForm::default()
        };
        let payload = form.to_create_payload();
        assert_eq!(payload.qty, None);
        assert_eq!(payload.price, None);
        // Text fields stay present even when empty.
        assert_eq!(payload.prodname.as_deref(), Some(""));
    }

    #[test]
    fn from_item_copies_fields_verbatim() {
        let item = Item {
            id: "abc".into(),
            prodname: Some("Widget".into()),
            qty: Some(10),
            price: Some(2.5),
            status: None,
        };
        let form = ItemForm::from_item(&item);
        assert_eq!(form.prodname, "Widget");
        assert_eq!(form.qty, "10");
        assert_eq!(form.price, "2.5");
        assert_eq!(form.status, "");
    }

    #[test]
    fn update_payload_carries_id() {
        let form = ItemForm {
            qty: "3".into(),
            ..ItemForm::default()
        };
        let payload = form.to_update_payload("abc");
        assert_eq!(payload.id, "abc");
        assert_eq!(payload.qty, Some(3));
    }
}
