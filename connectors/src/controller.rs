//! Async driver for the customer table.
//!
//! The controller owns a [`CustomerStore`] and the table state. Each user
//! action runs the matching store call and applies the outcome, then pokes
//! the registered listener so the view can re-render from a fresh
//! [`snapshot`](CustomerTableController::snapshot). Once
//! [`detach`](CustomerTableController::detach)ed, late responses are dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use shared::table::CustomerTable;

use crate::customers::CustomerStore;

type Listener = Rc<dyn Fn()>;

pub struct CustomerTableController<S> {
    store: S,
    state: RefCell<CustomerTable>,
    attached: Cell<bool>,
    listener: RefCell<Option<Listener>>,
}

impl<S: CustomerStore> CustomerTableController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RefCell::new(CustomerTable::new()),
            attached: Cell::new(true),
            listener: RefCell::new(None),
        }
    }

    /// Called after every state change while attached
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn snapshot(&self) -> CustomerTable {
        self.state.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Apply a synchronous change (form input, search, dismissals)
    pub fn update<R>(&self, f: impl FnOnce(&mut CustomerTable) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        if !self.attached.get() {
            return;
        }
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    /// Reload the list. Returns `true` when this load's result was applied.
    pub async fn refresh(&self) -> bool {
        let ticket = self.update(|table| table.begin_load());
        let result = self.store.list().await;

        if !self.attached.get() {
            tracing::debug!("Dropping customer list for detached table");
            return false;
        }
        let applied = self.update(|table| table.finish_load(ticket, result));
        if !applied {
            tracing::debug!("Discarding superseded customer list");
        }
        applied
    }

    /// Submit the add-form draft. Returns `true` when a customer was created.
    pub async fn submit_new(&self) -> bool {
        let Some(input) = self.update(|table| table.prepare_create()) else {
            return false;
        };
        let result = self.store.create(&input).await;

        if !self.attached.get() {
            return false;
        }
        let created = result.is_ok();
        self.update(|table| table.finish_create(result));
        created
    }

    /// Save the open inline editor. Returns `true` when the row was replaced.
    pub async fn save_edit(&self) -> bool {
        let Some((id, input)) = self.update(|table| table.prepare_update()) else {
            return false;
        };
        let result = self.store.update(&id, &input).await;

        if !self.attached.get() {
            return false;
        }
        let saved = result.is_ok();
        self.update(|table| table.finish_update(result));
        saved
    }

    /// Delete after `confirm` agrees. The row leaves the list only once the
    /// store reported success.
    pub async fn delete(&self, id: &str, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        if !self.update(|table| table.begin_delete(id)) {
            return false;
        }
        let result = self.store.delete(id).await;

        if !self.attached.get() {
            return false;
        }
        let deleted = result.is_ok();
        self.update(|table| table.finish_delete(id, result));
        deleted
    }

    /// Stop applying responses; the owning view is gone
    pub fn detach(&self) {
        self.attached.set(false);
        self.state.borrow_mut().abandon_loads();
        self.listener.borrow_mut().take();
    }
}
