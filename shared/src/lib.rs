//! Types and pure logic shared by the dashboard connectors and the frontend.

pub mod calendar;
pub mod error;
pub mod generation;
pub mod models;
pub mod table;

pub use error::{ErrorKind, StoreError};
pub use models::{Attendee, Customer, CustomerInput, Event};
