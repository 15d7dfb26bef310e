pub mod booking;
pub mod contact;
pub mod request;

pub use booking::{Booking, BookingRequest};
pub use contact::{Contact, ContactRequest};
pub use request::OkResponse;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Fresh identifier for a newly created record.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Creation timestamp in the `2024-01-01T10:00:00.000Z` form.
pub fn created_at_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
