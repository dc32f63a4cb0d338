use anyhow::{Context, Result};

pub const DEFAULT_BOOKINGS_API_BASE: &str = "https://api.cal.com/v1";
pub const DEFAULT_RECORDS_API_BASE: &str = "https://api.airtable.com";
pub const DEFAULT_FETCH_LIMIT: usize = 50;

/// Scheduling service (Cal.com v1) settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    pub api_base: String,
    pub api_key: String,
    /// Account handle used in public booking links
    pub username: String,
    /// Bookings requested per calendar refresh
    pub fetch_limit: usize,
}

/// Tabular-data store (Airtable REST) settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerStoreConfig {
    pub api_base: String,
    pub token: String,
    pub base_id: String,
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub bookings: BookingConfig,
    pub customers: CustomerStoreConfig,
}

impl Default for ConnectorConfig {
    /// Public endpoints, no credentials
    fn default() -> Self {
        Self {
            bookings: BookingConfig {
                api_base: DEFAULT_BOOKINGS_API_BASE.to_string(),
                api_key: String::new(),
                username: String::new(),
                fetch_limit: DEFAULT_FETCH_LIMIT,
            },
            customers: CustomerStoreConfig {
                api_base: DEFAULT_RECORDS_API_BASE.to_string(),
                token: String::new(),
                base_id: String::new(),
                table_name: String::new(),
            },
        }
    }
}

impl ConnectorConfig {
    /// Read the process environment, loading `.env` first when present
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit env file, which
    /// must exist. Variables already set in the process take precedence.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenv::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Values captured when the crate was compiled; the browser has no
    /// process environment to read at runtime.
    pub fn from_build_env() -> Result<Self> {
        let captured = [
            ("CAL_API_KEY", option_env!("CAL_API_KEY")),
            ("CAL_USERNAME", option_env!("CAL_USERNAME")),
            ("CAL_API_BASE", option_env!("CAL_API_BASE")),
            ("CALENDAR_FETCH_LIMIT", option_env!("CALENDAR_FETCH_LIMIT")),
            ("AIRTABLE_TOKEN", option_env!("AIRTABLE_TOKEN")),
            ("AIRTABLE_BASE_ID", option_env!("AIRTABLE_BASE_ID")),
            ("AIRTABLE_TABLE_NAME", option_env!("AIRTABLE_TABLE_NAME")),
            ("AIRTABLE_API_BASE", option_env!("AIRTABLE_API_BASE")),
        ];
        Self::from_lookup(|key| {
            captured
                .iter()
                .find(|(name, _)| *name == key)
                .and_then(|(_, value)| value.map(str::to_string))
        })
    }

    /// Build from any key lookup. Missing credentials are not an error:
    /// requests made without them fail at call time.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let fetch_limit = match get("CALENDAR_FETCH_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("CALENDAR_FETCH_LIMIT must be a valid number")?,
            None => DEFAULT_FETCH_LIMIT,
        };

        let config = Self {
            bookings: BookingConfig {
                api_base: get("CAL_API_BASE")
                    .unwrap_or_else(|| DEFAULT_BOOKINGS_API_BASE.to_string()),
                api_key: get("CAL_API_KEY").unwrap_or_default(),
                username: get("CAL_USERNAME").unwrap_or_default(),
                fetch_limit,
            },
            customers: CustomerStoreConfig {
                api_base: get("AIRTABLE_API_BASE")
                    .unwrap_or_else(|| DEFAULT_RECORDS_API_BASE.to_string()),
                token: get("AIRTABLE_TOKEN").unwrap_or_default(),
                base_id: get("AIRTABLE_BASE_ID").unwrap_or_default(),
                table_name: get("AIRTABLE_TABLE_NAME").unwrap_or_default(),
            },
        };

        let missing = config.missing_credentials();
        if !missing.is_empty() {
            tracing::warn!("Connector credentials not configured: {}", missing.join(", "));
        }

        Ok(config)
    }

    /// Names of the credential variables that were not provided
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("CAL_API_KEY", &self.bookings.api_key),
            ("CAL_USERNAME", &self.bookings.username),
            ("AIRTABLE_TOKEN", &self.customers.token),
            ("AIRTABLE_BASE_ID", &self.customers.base_id),
            ("AIRTABLE_TABLE_NAME", &self.customers.table_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
