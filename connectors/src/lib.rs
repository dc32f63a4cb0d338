//! HTTP connectors for the dashboard's two remote services and the
//! controller that drives the customer table against a store.

pub mod bookings;
pub mod config;
pub mod controller;
pub mod customers;

#[cfg(test)]
mod test_support;

pub use bookings::{BookingClient, BookingFeed, EventType};
pub use config::{BookingConfig, ConnectorConfig, CustomerStoreConfig};
pub use controller::CustomerTableController;
pub use customers::{CustomerClient, CustomerStore};
