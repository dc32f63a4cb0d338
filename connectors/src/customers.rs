//! Customer records kept in a tabular-data store (Airtable REST API).
//!
//! Reads accept several spellings of each column and take the first
//! non-empty one. Writes go out under the canonical column names, cleaned
//! by [`create_fields`] or [`update_fields`]. The two policies differ on
//! purpose: creating drops blank values, updating forwards them so a field
//! can be cleared.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use shared::table::matches_search;
use shared::{Customer, CustomerInput, StoreError};

use crate::config::CustomerStoreConfig;

pub const NAME_FIELD: &str = "Name";
pub const EMAIL_FIELD: &str = "Email";
pub const APPOINTMENT_ON_FIELD: &str = "Appointment On";
pub const APPOINTMENT_FOR_FIELD: &str = "Appointment For";
pub const TIMING_FIELD: &str = "Timing";

// Accepted source columns per field, most preferred first
const NAME_ALIASES: &[&str] = &[NAME_FIELD, "name"];
const EMAIL_ALIASES: &[&str] = &[EMAIL_FIELD, "email"];
const APPOINTMENT_ON_ALIASES: &[&str] = &[APPOINTMENT_ON_FIELD, "appointment on"];
const APPOINTMENT_FOR_ALIASES: &[&str] = &[APPOINTMENT_FOR_FIELD, "appointment for"];
const TIMING_ALIASES: &[&str] = &[TIMING_FIELD, "timing", "Time"];

fn iso_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern should compile"))
}

/// Remote table holding customers
#[async_trait(?Send)]
pub trait CustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, StoreError>;

    async fn create(&self, input: &CustomerInput) -> Result<Customer, StoreError>;

    async fn update(&self, id: &str, input: &CustomerInput) -> Result<Customer, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<Value>,
    /// Cursor for the next page, absent on the last one
    #[serde(default)]
    offset: Option<String>,
}

/// First non-empty value among `aliases`, rendered as text
fn field_text(fields: &Map<String, Value>, aliases: &[&str]) -> String {
    aliases
        .iter()
        .find_map(|alias| match fields.get(*alias) {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn customer_from_record(raw: Value) -> Result<Customer, StoreError> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidResponse("record without id".to_string()))?;
    let empty = Map::new();
    let fields = raw.get("fields").and_then(Value::as_object).unwrap_or(&empty);

    Ok(Customer {
        id,
        name: field_text(fields, NAME_ALIASES),
        email: field_text(fields, EMAIL_ALIASES),
        appointment_on: field_text(fields, APPOINTMENT_ON_ALIASES),
        appointment_for: field_text(fields, APPOINTMENT_FOR_ALIASES),
        timing: field_text(fields, TIMING_ALIASES),
        raw,
    })
}

fn checked_date(value: &str) -> Option<&str> {
    if iso_date().is_match(value) {
        Some(value)
    } else {
        tracing::warn!("Skipping invalid date format for {}: {:?}", APPOINTMENT_ON_FIELD, value);
        None
    }
}

/// Fields sent when creating: only present, non-blank values. Name and
/// email are trimmed; a malformed appointment date is left out.
pub fn create_fields(input: &CustomerInput) -> Map<String, Value> {
    let mut fields = Map::new();
    let present = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

    if let Some(name) = present(&input.name) {
        fields.insert(NAME_FIELD.to_string(), json!(name.trim()));
    }
    if let Some(email) = present(&input.email) {
        fields.insert(EMAIL_FIELD.to_string(), json!(email.trim()));
    }
    if let Some(date) = present(&input.appointment_on) {
        if let Some(date) = checked_date(&date) {
            fields.insert(APPOINTMENT_ON_FIELD.to_string(), json!(date));
        }
    }
    if let Some(purpose) = present(&input.appointment_for) {
        fields.insert(APPOINTMENT_FOR_FIELD.to_string(), json!(purpose));
    }
    if let Some(timing) = present(&input.timing) {
        fields.insert(TIMING_FIELD.to_string(), json!(timing));
    }
    fields
}

/// Fields sent when updating: every provided value, blanks included. A
/// blank appointment date clears the column with `null`; a malformed one
/// is left out.
pub fn update_fields(input: &CustomerInput) -> Map<String, Value> {
    let mut fields = Map::new();

    if let Some(name) = &input.name {
        fields.insert(NAME_FIELD.to_string(), json!(name));
    }
    if let Some(email) = &input.email {
        fields.insert(EMAIL_FIELD.to_string(), json!(email));
    }
    if let Some(date) = &input.appointment_on {
        if date.trim().is_empty() {
            fields.insert(APPOINTMENT_ON_FIELD.to_string(), Value::Null);
        } else if let Some(date) = checked_date(date) {
            fields.insert(APPOINTMENT_ON_FIELD.to_string(), json!(date));
        }
    }
    if let Some(purpose) = &input.appointment_for {
        fields.insert(APPOINTMENT_FOR_FIELD.to_string(), json!(purpose));
    }
    if let Some(timing) = &input.timing {
        fields.insert(TIMING_FIELD.to_string(), json!(timing));
    }
    fields
}

pub struct CustomerClient {
    http: reqwest::Client,
    config: CustomerStoreConfig,
}

impl CustomerClient {
    pub fn new(config: CustomerStoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &CustomerStoreConfig {
        &self.config
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.table_url(), urlencoding::encode(id))
    }

    fn table_url(&self) -> String {
        format!(
            "{}/v0/{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.base_id,
            urlencoding::encode(&self.config.table_name)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
    }

    /// Send and classify any non-2xx answer
    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match body.trim() {
            "" => status.canonical_reason().unwrap_or("Unknown").to_string(),
            text => text.to_string(),
        };
        Err(StoreError::from_status(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    /// Probe the table with a single-record read
    pub async fn test_connection(&self) -> Result<(), StoreError> {
        let request = self
            .request(Method::GET, &self.table_url())
            .query(&[("maxRecords", "1")]);
        self.send(request).await?;
        Ok(())
    }

    /// Every record, following the pagination cursor
    pub async fn fetch_all(&self) -> Result<Vec<Customer>, StoreError> {
        let url = self.table_url();
        let mut customers = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.request(Method::GET, &url);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }
            let page: RecordPage = Self::decode(self.send(request).await?).await?;

            if customers.is_empty() {
                if let Some(first) = page.records.first() {
                    let columns: Vec<&str> = first
                        .get("fields")
                        .and_then(Value::as_object)
                        .map(|fields| fields.keys().map(String::as_str).collect())
                        .unwrap_or_default();
                    tracing::debug!("Customer table columns: {:?}", columns);
                }
            }

            for record in page.records {
                customers.push(customer_from_record(record)?);
            }

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(customers)
    }

    /// Customers matching `query` by name, email or appointment purpose
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>, StoreError> {
        let customers = self.list().await?;
        Ok(customers
            .into_iter()
            .filter(|customer| matches_search(customer, query))
            .collect())
    }

    async fn write(&self, method: Method, url: &str, fields: Map<String, Value>) -> Result<Customer, StoreError> {
        tracing::debug!("Sending fields: {:?}", fields);
        let request = self.request(method, url).json(&json!({ "fields": fields }));
        let record: Value = Self::decode(self.send(request).await?).await?;
        customer_from_record(record)
    }
}

#[async_trait(?Send)]
impl CustomerStore for CustomerClient {
    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        self.test_connection().await?;
        let customers = self.fetch_all().await;
        match &customers {
            Ok(list) => tracing::info!("Loaded {} customers", list.len()),
            Err(e) => tracing::error!("Failed to load customers: {} ({})", e, e.message()),
        }
        customers
    }

    async fn create(&self, input: &CustomerInput) -> Result<Customer, StoreError> {
        input.check_required()?;
        let created = self
            .write(Method::POST, &self.table_url(), create_fields(input))
            .await;
        if let Err(e) = &created {
            tracing::error!("Failed to create customer: {} ({})", e, e.message());
        }
        created
    }

    async fn update(&self, id: &str, input: &CustomerInput) -> Result<Customer, StoreError> {
        let url = self.record_url(id);
        let updated = self.write(Method::PATCH, &url, update_fields(input)).await;
        if let Err(e) = &updated {
            tracing::error!("Failed to update customer {}: {} ({})", id, e, e.message());
        }
        updated
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.record_url(id);
        let result = self.send(self.request(Method::DELETE, &url)).await.map(|_| ());
        if let Err(e) = &result {
            tracing::error!("Failed to delete customer {}: {} ({})", id, e, e.message());
        }
        result
    }
}
