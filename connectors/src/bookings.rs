//! Scheduling service client (Cal.com v1 bookings API).
//!
//! Fetching upcoming bookings never fails: when the service cannot be
//! reached, answers with an error status or returns something unreadable,
//! the feed degrades to a fixed sample schedule and reports why.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use shared::models::{DEFAULT_EVENT_LOCATION, DEFAULT_EVENT_TITLE};
use shared::{Attendee, Event};

use crate::config::BookingConfig;

const PUBLIC_BOOKING_BASE: &str = "https://cal.com";

/// Upcoming bookings, either as served or substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingFeed {
    Live(Vec<Event>),
    Degraded { events: Vec<Event>, cause: String },
}

impl BookingFeed {
    pub fn events(&self) -> &[Event] {
        match self {
            BookingFeed::Live(events) | BookingFeed::Degraded { events, .. } => events,
        }
    }

    pub fn into_events(self) -> Vec<Event> {
        match self {
            BookingFeed::Live(events) | BookingFeed::Degraded { events, .. } => events,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, BookingFeed::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            BookingFeed::Live(_) => None,
            BookingFeed::Degraded { cause, .. } => Some(cause),
        }
    }
}

/// Bookable meeting type offered on the public booking page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// Minutes
    #[serde(default)]
    pub length: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct BookingList {
    #[serde(default)]
    bookings: Option<Vec<BookingRecord>>,
}

#[derive(Debug, Default, Deserialize)]
struct EventTypeList {
    #[serde(default)]
    event_types: Option<Vec<EventType>>,
}

/// Booking as served by the API. Fields are kept untyped so one odd value
/// only loses that field; gaps are filled in when converting to an
/// [`Event`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    id: Option<Value>,
    title: Option<Value>,
    event_type: Option<Value>,
    start_time: Option<Value>,
    end_time: Option<Value>,
    location: Option<Value>,
    description: Option<Value>,
    attendees: Option<Value>,
}

impl BookingRecord {
    fn into_event(self, position: usize) -> Event {
        let id = text(self.id.as_ref()).unwrap_or_else(|| format!("booking-{}", position));
        let title = text(self.title.as_ref())
            .or_else(|| text(self.event_type.as_ref().and_then(|kind| kind.get("title"))))
            .unwrap_or_else(|| DEFAULT_EVENT_TITLE.to_string());

        Event {
            id,
            title,
            start: parse_instant(text(self.start_time.as_ref()).as_deref()),
            end: parse_instant(text(self.end_time.as_ref()).as_deref()),
            location: text(self.location.as_ref())
                .unwrap_or_else(|| DEFAULT_EVENT_LOCATION.to_string()),
            description: text(self.description.as_ref()).unwrap_or_default(),
            attendees: attendees(self.attendees),
        }
    }
}

/// Non-empty strings and numbers as text; anything else counts as absent
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn attendees(value: Option<Value>) -> Vec<Attendee> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect()
}

fn parse_instant(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Some(instant.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Unparseable booking time {:?}: {}", raw, e);
            None
        }
    }
}

pub struct BookingClient {
    http: reqwest::Client,
    config: BookingConfig,
}

impl BookingClient {
    pub fn new(config: BookingConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Up to `limit` bookings starting from now
    pub async fn fetch_upcoming(&self, limit: usize) -> BookingFeed {
        self.fetch_upcoming_from(limit, Utc::now()).await
    }

    pub async fn fetch_upcoming_from(&self, limit: usize, now: DateTime<Utc>) -> BookingFeed {
        let query = [
            ("take", limit.to_string()),
            ("startTime", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ];

        match self.get_json::<BookingList>("/bookings", &query).await {
            Ok(list) => {
                let events: Vec<Event> = list
                    .bookings
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .map(|(position, record)| record.into_event(position))
                    .take(limit)
                    .collect();
                tracing::info!("Fetched {} upcoming bookings", events.len());
                BookingFeed::Live(events)
            }
            Err(cause) => {
                tracing::warn!("Failed to fetch upcoming bookings, using sample schedule: {}", cause);
                BookingFeed::Degraded {
                    events: sample_events(now),
                    cause,
                }
            }
        }
    }

    /// Bookings on one UTC calendar day; empty when the request fails
    pub async fn fetch_day(&self, day: NaiveDate) -> Vec<Event> {
        let next = day.succ_opt().unwrap_or(day);
        let query = [
            ("startTime", day.format("%Y-%m-%d").to_string()),
            ("endTime", next.format("%Y-%m-%d").to_string()),
        ];

        match self.get_json::<BookingList>("/bookings", &query).await {
            Ok(list) => list
                .bookings
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(position, record)| record.into_event(position))
                .collect(),
            Err(cause) => {
                tracing::warn!("Failed to fetch bookings for {}: {}", day, cause);
                Vec::new()
            }
        }
    }

    pub async fn fetch_today(&self) -> Vec<Event> {
        self.fetch_day(Utc::now().date_naive()).await
    }

    /// Meeting types offered by the account; empty when the request fails
    pub async fn event_types(&self) -> Vec<EventType> {
        match self.get_json::<EventTypeList>("/event-types", &[]).await {
            Ok(list) => list.event_types.unwrap_or_default(),
            Err(cause) => {
                tracing::warn!("Failed to fetch event types: {}", cause);
                Vec::new()
            }
        }
    }

    /// Public booking page for an event type
    pub fn booking_url(&self, slug: &str) -> String {
        format!("{}/{}/{}", PUBLIC_BOOKING_BASE, self.config.username, slug)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, String> {
        let url = format!("{}{}", self.config.api_base.trim_end_matches('/'), path);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .query(query)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP error: {} {}", status, body.trim()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

/// Fixed schedule shown when live bookings are unavailable, relative to `now`
pub fn sample_events(now: DateTime<Utc>) -> Vec<Event> {
    let slot = |id: i64, title: &str, attendee: &str, start_min: i64, end_min: i64| BookingRecord {
        id: Some(Value::from(id)),
        title: Some(Value::from(title)),
        start_time: Some(Value::from((now + Duration::minutes(start_min)).to_rfc3339())),
        end_time: Some(Value::from((now + Duration::minutes(end_min)).to_rfc3339())),
        attendees: Some(json!([{ "name": attendee }])),
        ..Default::default()
    };

    [
        slot(1, "Team Standup", "Development Team", 120, 150),
        slot(2, "Client Call - Project Review", "Client ABC", 240, 300),
        slot(3, "1-on-1 Meeting", "Team Lead", 1440, 1470),
    ]
    .into_iter()
    .enumerate()
    .map(|(position, record)| record.into_event(position))
    .collect()
}
