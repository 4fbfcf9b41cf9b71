use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::api::InventoryApi;
use crate::model::Item;
use crate::state::{AppState, ItemForm};

/// Change-notification callback for a rendering layer.
pub type ChangeHandler = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Opaque subscription handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// The inventory client — one state container plus the action handlers
/// that drive the five endpoints.
///
/// Rust owns the state machine; renderers subscribe and draw snapshots.
/// Every mutating action awaits its call, then refreshes the full list —
/// there is no local patching, no retry, and no timeout. List refreshes
/// carry a monotonic sequence number so a refresh that lost a race with
/// a newer one is discarded instead of clobbering the display.
pub struct InventoryApp<A: InventoryApi> {
    api: A,
    state: Mutex<AppState>,
    /// Sequence number of the most recently started list refresh.
    refresh_seq: AtomicU64,
    next_sub_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, ChangeHandler)>>,
}

impl<A: InventoryApi> InventoryApp<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(AppState::default()),
            refresh_seq: AtomicU64::new(0),
            next_sub_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot the current state.
    pub fn state(&self) -> AppState {
        self.state.lock().expect("state poisoned").clone()
    }

    /// Register a change handler, called after every state mutation.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_sub_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.listeners.lock().expect("listeners poisoned");
        listeners.push((id, Arc::new(handler)));
        id
    }

    /// Remove a change handler.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut listeners = self.listeners.lock().expect("listeners poisoned");
        listeners.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Mutate state under the lock, then notify listeners with a snapshot.
    /// The lock is never held across an await or a handler call.
    fn mutate(&self, f: impl FnOnce(&mut AppState)) {
        let snapshot = {
            let mut state = self.state.lock().expect("state poisoned");
            f(&mut state);
            state.clone()
        };
        let handlers: Vec<ChangeHandler> = {
            let listeners = self.listeners.lock().expect("listeners poisoned");
            listeners.iter().map(|(_, h)| Arc::clone(h)).collect()
        };
        for handler in handlers {
            handler(&snapshot);
        }
    }

    // ----------------------------------------------------------------------
    // Actions
    // ----------------------------------------------------------------------

    /// Load (or reload) the full item list.
    ///
    /// Sets the loading flag and clears the banner up front; on success
    /// replaces the list, on failure sets the banner and leaves the list at
    /// its prior value. A completion that arrives after a newer load
    /// started is dropped entirely.
    pub async fn load(&self) {
        let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.mutate(|s| {
            s.loading = true;
            s.error.clear();
        });

        let result = self.api.list_all().await;

        if self.refresh_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding stale list refresh");
            return;
        }

        self.mutate(|s| {
            s.loading = false;
            match result {
                Ok(items) => s.items = items,
                Err(e) => s.error = e.to_string(),
            }
        });
    }

    /// Bind a new form snapshot (an input changed).
    pub fn set_form(&self, form: ItemForm) {
        self.mutate(|s| s.form = form);
    }

    /// Submit the form: create in create mode, update in edit mode.
    ///
    /// On success the list is refreshed and the form reset to create mode;
    /// on failure the banner is set and the form (and edit target) kept.
    pub async fn submit(&self) {
        let (form, editing) = {
            let state = self.state.lock().expect("state poisoned");
            (state.form.clone(), state.editing.clone())
        };
        self.mutate(|s| s.error.clear());

        let outcome = match &editing {
            None => self.api.create(&form.to_create_payload()).await.map(|_| ()),
            Some(id) => self
                .api
                .update(&form.to_update_payload(id))
                .await
                .map(|_| ()),
        };

        match outcome {
            Ok(()) => {
                self.load().await;
                self.mutate(|s| {
                    s.form = ItemForm::default();
                    s.editing = None;
                });
            }
            Err(e) => self.mutate(|s| s.error = e.to_string()),
        }
    }

    /// Enter edit mode for an item: copy its fields into the form verbatim
    /// and record its id.
    pub fn start_edit(&self, item: &Item) {
        let form = ItemForm::from_item(item);
        let id = item.id.clone();
        self.mutate(|s| {
            s.form = form;
            s.editing = Some(id);
        });
    }

    /// Leave edit mode and clear the form. No network call.
    pub fn cancel_edit(&self) {
        self.mutate(|s| {
            s.form = ItemForm::default();
            s.editing = None;
        });
    }

    /// Delete one item by id, then refresh on success.
    pub async fn delete(&self, id: &str) {
        self.mutate(|s| s.error.clear());
        match self.api.delete(id).await {
            Ok(()) => self.load().await,
            Err(e) => self.mutate(|s| s.error = e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::oneshot;

    use crate::api::ApiError;
    use crate::model::{CreatePayload, UpdatePayload};

    /// In-memory fake of the server surface.
    #[derive(Default)]
    struct MockApi {
        items: Mutex<Vec<Item>>,
        next_id: AtomicU64,
        fail: AtomicBool,
        calls: AtomicU64,
        /// When set, the next list_all snapshots the items, then blocks on
        /// the receiver before returning the (possibly stale) snapshot.
        gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
        engaged: tokio::sync::Notify,
    }

    impl MockApi {
        fn check(&self) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ApiError::Server("mock backend down".into()))
            } else {
                Ok(())
            }
        }

        fn seed(&self, prodname: &str, qty: i64) -> Item {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let item = Item {
                id: format!("id-{n}"),
                prodname: Some(prodname.into()),
                qty: Some(qty),
                price: None,
                status: None,
            };
            self.items.lock().unwrap().push(item.clone());
            item
        }
    }

    #[async_trait::async_trait]
    impl InventoryApi for Arc<MockApi> {
        async fn list_all(&self) -> Result<Vec<Item>, ApiError> {
            self.check()?;
            let snapshot = self.items.lock().unwrap().clone();
            let gate = self.gate.lock().await.take();
            if let Some(rx) = gate {
                self.engaged.notify_one();
                let _ = rx.await;
            }
            Ok(snapshot)
        }

        async fn create(&self, payload: &CreatePayload) -> Result<Item, ApiError> {
            self.check()?;
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let item = Item {
                id: format!("id-{n}"),
                prodname: payload.prodname.clone(),
                qty: payload.qty,
                price: payload.price,
                status: payload.status.clone(),
            };
            self.items.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn update(&self, payload: &UpdatePayload) -> Result<Option<Item>, ApiError> {
            self.check()?;
            let mut items = self.items.lock().unwrap();
            let Some(slot) = items.iter_mut().find(|i| i.id == payload.id) else {
                return Ok(None);
            };
            let prior = slot.clone();
            slot.prodname = payload.prodname.clone();
            slot.qty = payload.qty;
            slot.price = payload.price;
            slot.status = payload.status.clone();
            Ok(Some(prior))
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            self.check()?;
            self.items.lock().unwrap().retain(|i| i.id != id);
            Ok(())
        }
    }

    fn make_app() -> (Arc<MockApi>, InventoryApp<Arc<MockApi>>) {
        let mock = Arc::new(MockApi::default());
        let app = InventoryApp::new(Arc::clone(&mock));
        (mock, app)
    }

    #[tokio::test]
    async fn initial_load_populates_list() {
        let (mock, app) = make_app();
        mock.seed("Widget", 10);
        app.load().await;

        let state = app.state();
        assert_eq!(state.items.len(), 1);
        assert!(!state.loading);
        assert!(state.error.is_empty());
    }

    #[tokio::test]
    async fn load_failure_sets_banner_and_keeps_items() {
        let (mock, app) = make_app();
        mock.seed("Widget", 10);
        app.load().await;

        mock.fail.store(true, Ordering::SeqCst);
        app.load().await;

        let state = app.state();
        assert!(!state.error.is_empty());
        assert_eq!(state.items.len(), 1);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn banner_clears_on_next_successful_action() {
        let (mock, app) = make_app();
        mock.fail.store(true, Ordering::SeqCst);
        app.load().await;
        assert!(!app.state().error.is_empty());

        mock.fail.store(false, Ordering::SeqCst);
        app.load().await;
        assert!(app.state().error.is_empty());
    }

    #[tokio::test]
    async fn create_flow_refreshes_and_resets_form() {
        let (mock, app) = make_app();
        app.set_form(ItemForm {
            prodname: "Widget".into(),
            qty: "10".into(),
            price: "2.5".into(),
            status: "S".into(),
        });
        app.submit().await;

        let state = app.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items, *mock.items.lock().unwrap());
        assert_eq!(state.form, ItemForm::default());
        assert!(state.editing.is_none());
        assert!(state.error.is_empty());
    }

    #[tokio::test]
    async fn create_failure_keeps_form_values() {
        let (mock, app) = make_app();
        mock.fail.store(true, Ordering::SeqCst);
        let form = ItemForm {
            prodname: "Widget".into(),
            qty: "10".into(),
            ..ItemForm::default()
        };
        app.set_form(form.clone());
        app.submit().await;

        let state = app.state();
        assert!(!state.error.is_empty());
        assert_eq!(state.form, form);
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn edit_flow_updates_and_leaves_edit_mode() {
        let (mock, app) = make_app();
        let item = mock.seed("Widget", 5);
        app.load().await;

        app.start_edit(&item);
        let state = app.state();
        assert_eq!(state.editing.as_deref(), Some(item.id.as_str()));
        assert_eq!(state.form.qty, "5");

        app.set_form(ItemForm {
            qty: "99".into(),
            ..state.form
        });
        app.submit().await;

        let state = app.state();
        assert!(state.editing.is_none());
        assert_eq!(state.form, ItemForm::default());
        assert_eq!(state.items[0].qty, Some(99));
    }

    #[tokio::test]
    async fn update_failure_stays_in_edit_mode() {
        let (mock, app) = make_app();
        let item = mock.seed("Widget", 5);
        app.load().await;
        app.start_edit(&item);

        mock.fail.store(true, Ordering::SeqCst);
        app.submit().await;

        let state = app.state();
        assert_eq!(state.editing.as_deref(), Some(item.id.as_str()));
        assert!(!state.error.is_empty());
    }

    #[tokio::test]
    async fn cancel_edit_resets_without_network_call() {
        let (mock, app) = make_app();
        let item = mock.seed("Widget", 5);
        app.load().await;
        app.start_edit(&item);

        let calls_before = mock.calls.load(Ordering::SeqCst);
        app.cancel_edit();

        let state = app.state();
        assert!(state.editing.is_none());
        assert_eq!(state.form, ItemForm::default());
        assert_eq!(mock.calls.load(Ordering::SeqCst), calls_before);
    }

    #[tokio::test]
    async fn delete_refreshes_list() {
        let (mock, app) = make_app();
        let a = mock.seed("A", 1);
        mock.seed("B", 2);
        app.load().await;

        app.delete(&a.id).await;

        let state = app.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items, *mock.items.lock().unwrap());
    }

    #[tokio::test]
    async fn delete_failure_sets_banner_and_keeps_items() {
        let (mock, app) = make_app();
        let a = mock.seed("A", 1);
        app.load().await;

        mock.fail.store(true, Ordering::SeqCst);
        app.delete(&a.id).await;

        let state = app.state();
        assert!(!state.error.is_empty());
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn stale_refresh_is_discarded() {
        let (mock, app) = make_app();
        let app = Arc::new(app);
        mock.seed("A", 1);

        // First load snapshots [A], then blocks.
        let (tx, rx) = oneshot::channel();
        *mock.gate.lock().await = Some(rx);
        let slow = tokio::spawn({
            let app = Arc::clone(&app);
            async move { app.load().await }
        });
        mock.engaged.notified().await;

        // A newer load starts and completes with [A, B].
        mock.seed("B", 2);
        app.load().await;
        assert_eq!(app.state().items.len(), 2);

        // Release the stale load; its snapshot must not clobber the list.
        tx.send(()).unwrap();
        slow.await.unwrap();
        assert_eq!(app.state().items.len(), 2);
        assert!(!app.state().loading);
    }

    #[tokio::test]
    async fn listeners_fire_on_every_mutation() {
        let (_mock, app) = make_app();
        let count = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&count);
        let sub = app.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        app.set_form(ItemForm::default());
        app.cancel_edit();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        app.unsubscribe(sub);
        app.cancel_edit();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
