use connectors::{BookingClient, ConnectorConfig, CustomerClient};

/// Connector settings baked in at build time
pub fn connector_config() -> ConnectorConfig {
    ConnectorConfig::from_build_env().unwrap_or_else(|e| {
        tracing::error!("Invalid connector configuration, using defaults: {:#}", e);
        ConnectorConfig::default()
    })
}

pub fn booking_client() -> BookingClient {
    BookingClient::new(connector_config().bookings)
}

pub fn customer_client() -> CustomerClient {
    CustomerClient::new(connector_config().customers)
}
