//! State machine behind the customer table view.
//!
//! The table owns the fetched customer list, the add-form draft, the inline
//! edit buffer and the search query. Remote calls happen elsewhere: each
//! operation is split into a `begin_*`/`prepare_*` step that decides whether
//! a request is needed and a `finish_*` step that applies its outcome.

use crate::error::{ErrorKind, StoreError};
use crate::generation::{Generation, LoadTicket};
use crate::models::{Customer, CustomerInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error,
    Adding,
    /// Exactly one row is editable at a time
    Editing { id: String },
}

/// Dismissible error banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: ErrorKind,
    pub text: String,
}

impl Banner {
    fn new(error: &StoreError, prefix: Option<&str>) -> Self {
        let text = match prefix {
            Some(prefix) => format!("{}: {}", prefix, error),
            None => error.to_string(),
        };
        Self {
            kind: error.kind(),
            text,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerTable {
    customers: Vec<Customer>,
    phase: Phase,
    search: String,
    draft: CustomerInput,
    edit_buffer: CustomerInput,
    banner: Option<Banner>,
    prompt: Option<String>,
    busy: bool,
    loads: Generation,
}

impl CustomerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn draft(&self) -> &CustomerInput {
        &self.draft
    }

    pub fn edit_buffer(&self) -> &CustomerInput {
        &self.edit_buffer
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Blocking validation prompt, shown until acknowledged
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// A write request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_editing(&self, id: &str) -> bool {
        matches!(&self.phase, Phase::Editing { id: editing } if editing == id)
    }

    // Loading

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = Phase::Loading;
        self.banner = None;
        self.edit_buffer = CustomerInput::default();
        self.loads.issue()
    }

    /// Apply a load result. Returns `false` when the ticket was superseded
    /// and the result was discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Customer>, StoreError>,
    ) -> bool {
        if !self.loads.is_current(ticket) {
            return false;
        }
        match result {
            Ok(customers) => {
                self.customers = customers;
                self.phase = Phase::Idle;
            }
            Err(error) => {
                self.banner = Some(Banner::new(&error, None));
                self.phase = Phase::Error;
            }
        }
        true
    }

    /// Stale every outstanding load
    pub fn abandon_loads(&mut self) {
        self.loads.invalidate();
    }

    // Adding

    pub fn open_add_form(&mut self) {
        self.phase = Phase::Adding;
        self.prompt = None;
    }

    pub fn cancel_add(&mut self) {
        if self.phase == Phase::Adding {
            self.phase = Phase::Idle;
        }
        self.draft = CustomerInput::default();
        self.prompt = None;
    }

    pub fn draft_mut(&mut self) -> &mut CustomerInput {
        &mut self.draft
    }

    /// Validate the draft. On success the table turns busy and the payload
    /// to create is returned; otherwise the prompt is raised and nothing
    /// should be sent.
    pub fn prepare_create(&mut self) -> Option<CustomerInput> {
        if let Err(error) = self.draft.check_required() {
            self.prompt = Some(error.message().to_string());
            return None;
        }
        self.busy = true;
        Some(self.draft.clone())
    }

    pub fn finish_create(&mut self, result: Result<Customer, StoreError>) {
        self.busy = false;
        match result {
            Ok(customer) => {
                self.customers.push(customer);
                // The form may have been closed or a load started meanwhile
                if self.phase == Phase::Adding {
                    self.draft = CustomerInput::default();
                    self.phase = Phase::Idle;
                }
            }
            Err(StoreError::Validation(message)) => {
                self.prompt = Some(message);
            }
            Err(error) => {
                self.banner = Some(Banner::new(&error, Some("Failed to create customer")));
            }
        }
    }

    // Editing

    /// Open the inline editor for `id`, replacing any other open editor
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(customer) = self.customer(id) else {
            return false;
        };
        self.edit_buffer = CustomerInput::from(customer);
        self.phase = Phase::Editing { id: id.to_string() };
        true
    }

    pub fn edit_buffer_mut(&mut self) -> &mut CustomerInput {
        &mut self.edit_buffer
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.phase, Phase::Editing { .. }) {
            self.phase = Phase::Idle;
        }
        self.edit_buffer = CustomerInput::default();
    }

    pub fn prepare_update(&mut self) -> Option<(String, CustomerInput)> {
        let Phase::Editing { id } = &self.phase else {
            return None;
        };
        let id = id.clone();
        self.busy = true;
        Some((id, self.edit_buffer.clone()))
    }

    pub fn finish_update(&mut self, result: Result<Customer, StoreError>) {
        self.busy = false;
        match result {
            Ok(updated) => {
                // Another row's editor may have been opened while saving
                if self.is_editing(&updated.id) {
                    self.edit_buffer = CustomerInput::default();
                    self.phase = Phase::Idle;
                }
                if let Some(slot) = self.customers.iter_mut().find(|c| c.id == updated.id) {
                    *slot = updated;
                }
            }
            Err(error) => {
                self.banner = Some(Banner::new(&error, Some("Failed to update customer")));
            }
        }
    }

    // Deleting

    pub fn begin_delete(&mut self, id: &str) -> bool {
        if self.customer(id).is_none() {
            return false;
        }
        self.busy = true;
        true
    }

    /// Remove the row only once the remote delete succeeded
    pub fn finish_delete(&mut self, id: &str, result: Result<(), StoreError>) {
        self.busy = false;
        match result {
            Ok(()) => {
                self.customers.retain(|customer| customer.id != id);
                if self.is_editing(id) {
                    self.phase = Phase::Idle;
                    self.edit_buffer = CustomerInput::default();
                }
            }
            Err(error) => {
                self.banner = Some(Banner::new(&error, Some("Failed to delete customer")));
            }
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    // Search

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Customers matching the current search, in list order
    pub fn visible(&self) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|customer| matches_search(customer, &self.search))
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} customers",
            self.visible().len(),
            self.customers.len()
        )
    }
}

/// Case-insensitive substring match over name, email and appointment purpose
pub fn matches_search(customer: &Customer, query: &str) -> bool {
    let needle = query.to_lowercase();
    [&customer.name, &customer.email, &customer.appointment_for]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REQUIRED_FIELDS_PROMPT;

    fn customer(id: &str, name: &str, email: &str, purpose: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            appointment_on: String::new(),
            appointment_for: purpose.to_string(),
            timing: String::new(),
            raw: serde_json::Value::Null,
        }
    }

    fn loaded_table() -> CustomerTable {
        let mut table = CustomerTable::new();
        let ticket = table.begin_load();
        table.finish_load(
            ticket,
            Ok(vec![
                customer("rec1", "Ada Lovelace", "ada@example.com", "Consultation"),
                customer("rec2", "Grace Hopper", "grace@navy.mil", "Follow-up"),
            ]),
        );
        table
    }

    #[test]
    fn test_load_success_and_failure() {
        let table = loaded_table();
        assert_eq!(table.phase(), &Phase::Idle);
        assert_eq!(table.customers().len(), 2);

        let mut failing = CustomerTable::new();
        let ticket = failing.begin_load();
        assert_eq!(failing.phase(), &Phase::Loading);
        failing.finish_load(ticket, Err(StoreError::from_status(403, "forbidden")));

        assert_eq!(failing.phase(), &Phase::Error);
        let banner = failing.banner().unwrap();
        assert_eq!(banner.kind, ErrorKind::AccessDenied);
        assert!(banner.text.starts_with("Access denied"));
        assert!(!banner.text.contains("403"));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut table = CustomerTable::new();
        let first = table.begin_load();
        let second = table.begin_load();

        assert!(table.finish_load(second, Ok(vec![customer("new", "New", "n@x.io", "")])));
        assert!(!table.finish_load(first, Ok(vec![customer("old", "Old", "o@x.io", "")])));

        assert_eq!(table.customers()[0].id, "new");
    }

    #[test]
    fn test_abandoned_load_is_discarded() {
        let mut table = CustomerTable::new();
        let ticket = table.begin_load();
        table.abandon_loads();

        assert!(!table.finish_load(ticket, Ok(vec![customer("x", "X", "x@x.io", "")])));
        assert!(table.customers().is_empty());
    }

    #[test]
    fn test_blank_name_raises_prompt_without_payload() {
        let mut table = loaded_table();
        table.open_add_form();
        *table.draft_mut() = CustomerInput {
            name: Some(String::new()),
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };

        assert!(table.prepare_create().is_none());
        assert_eq!(table.phase(), &Phase::Adding);
        assert_eq!(table.prompt(), Some(REQUIRED_FIELDS_PROMPT));
        assert!(!table.is_busy());

        table.dismiss_prompt();
        assert_eq!(table.prompt(), None);
    }

    #[test]
    fn test_successful_create_appends_and_resets() {
        let mut table = loaded_table();
        table.open_add_form();
        table.draft_mut().name = Some("Linus".to_string());
        table.draft_mut().email = Some("linus@example.com".to_string());

        let payload = table.prepare_create().unwrap();
        assert_eq!(payload.name.as_deref(), Some("Linus"));
        assert!(table.is_busy());

        table.finish_create(Ok(customer("rec3", "Linus", "linus@example.com", "")));

        assert_eq!(table.phase(), &Phase::Idle);
        assert_eq!(table.customers().last().unwrap().id, "rec3");
        assert_eq!(table.draft(), &CustomerInput::default());
        assert!(!table.is_busy());
    }

    #[test]
    fn test_failed_create_keeps_form_open() {
        let mut table = loaded_table();
        table.open_add_form();
        table.draft_mut().name = Some("Linus".to_string());
        table.draft_mut().email = Some("linus@example.com".to_string());
        table.prepare_create();

        table.finish_create(Err(StoreError::from_status(422, "UNKNOWN_FIELD_NAME")));

        assert_eq!(table.phase(), &Phase::Adding);
        assert_eq!(table.customers().len(), 2);
        let banner = table.banner().unwrap();
        assert_eq!(banner.kind, ErrorKind::InvalidSchema);
        assert!(banner.text.starts_with("Failed to create customer: "));
        assert_eq!(table.draft().name.as_deref(), Some("Linus"));
    }

    #[test]
    fn test_only_one_row_editable() {
        let mut table = loaded_table();

        assert!(table.start_edit("rec1"));
        assert!(table.start_edit("rec2"));
        assert!(table.is_editing("rec2"));
        assert!(!table.is_editing("rec1"));
        assert_eq!(table.edit_buffer().name.as_deref(), Some("Grace Hopper"));

        assert!(!table.start_edit("missing"));
        assert!(table.is_editing("rec2"));
    }

    #[test]
    fn test_successful_update_replaces_in_place() {
        let mut table = loaded_table();
        table.start_edit("rec1");
        table.edit_buffer_mut().name = Some("Augusta Ada King".to_string());

        let (id, payload) = table.prepare_update().unwrap();
        assert_eq!(id, "rec1");
        assert_eq!(payload.name.as_deref(), Some("Augusta Ada King"));

        table.finish_update(Ok(customer("rec1", "Augusta Ada King", "ada@example.com", "")));

        assert_eq!(table.phase(), &Phase::Idle);
        assert_eq!(table.customers()[0].name, "Augusta Ada King");
        assert_eq!(table.customers()[1].id, "rec2");
    }

    #[test]
    fn test_update_response_keeps_other_row_editor() {
        let mut table = loaded_table();
        table.start_edit("rec1");
        table.prepare_update();

        table.start_edit("rec2");
        table.edit_buffer_mut().name = Some("Grace edited".to_string());
        table.finish_update(Ok(customer("rec1", "Ada King", "ada@example.com", "")));

        assert!(table.is_editing("rec2"));
        assert_eq!(table.edit_buffer().name.as_deref(), Some("Grace edited"));
        assert_eq!(table.customers()[0].name, "Ada King");
        assert!(!table.is_busy());
    }

    #[test]
    fn test_create_response_during_load_keeps_loading() {
        let mut table = loaded_table();
        table.open_add_form();
        table.draft_mut().name = Some("Linus".to_string());
        table.draft_mut().email = Some("linus@example.com".to_string());
        table.prepare_create();

        let ticket = table.begin_load();
        table.finish_create(Ok(customer("rec3", "Linus", "linus@example.com", "")));

        assert_eq!(table.phase(), &Phase::Loading);
        assert_eq!(table.customers().last().unwrap().id, "rec3");
        assert!(table.finish_load(ticket, Ok(vec![])));
        assert_eq!(table.phase(), &Phase::Idle);
    }

    #[test]
    fn test_failed_update_keeps_editing() {
        let mut table = loaded_table();
        table.start_edit("rec1");
        table.prepare_update();
        table.finish_update(Err(StoreError::Transport("connection refused".to_string())));

        assert!(table.is_editing("rec1"));
        assert_eq!(table.customers()[0].name, "Ada Lovelace");
        assert!(table.banner().unwrap().text.starts_with("Failed to update customer: "));
    }

    #[test]
    fn test_prepare_update_requires_editor() {
        let mut table = loaded_table();
        assert!(table.prepare_update().is_none());
        assert!(!table.is_busy());
    }

    #[test]
    fn test_delete_removes_row_only_on_success() {
        let mut table = loaded_table();

        assert!(table.begin_delete("rec1"));
        table.finish_delete("rec1", Err(StoreError::from_status(500, "Server Error")));
        assert!(table.customer("rec1").is_some());
        assert_eq!(table.banner().unwrap().kind, ErrorKind::GenericHttp);

        table.dismiss_banner();
        assert!(table.begin_delete("rec1"));
        table.finish_delete("rec1", Ok(()));
        assert!(table.customer("rec1").is_none());
        assert!(table.banner().is_none());

        assert!(!table.begin_delete("rec1"));
    }

    #[test]
    fn test_search_filters_in_memory() {
        let mut table = loaded_table();

        table.set_search("GRACE");
        assert_eq!(table.visible().len(), 1);
        table.set_search("consult");
        assert_eq!(table.visible()[0].id, "rec1");
        table.set_search("example.com");
        assert_eq!(table.summary(), "Showing 1 of 2 customers");
        table.set_search("");
        assert_eq!(table.summary(), "Showing 2 of 2 customers");
    }
}
