//! Booking records and the submission payload that creates them

use serde::{Deserialize, Serialize};

use super::{created_at_now, new_record_id, trimmed};
use crate::error::{AppError, Result};
use crate::store::{Collection, Record};
use crate::validation::{is_non_empty_text, is_optional_date, is_phone_like};

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing or invalid fields: name, phone, tests, address are required.";
pub const INVALID_TIME_MESSAGE: &str = "Invalid preferred time format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub tests: String,
    pub address: String,
    /// Preferred time exactly as submitted (trimmed), if any.
    pub time: Option<String>,
    /// ISO 8601 UTC with millisecond precision.
    pub created_at: String,
}

impl Record for Booking {
    const COLLECTION: Collection = Collection::Bookings;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub tests: Option<String>,
    pub address: Option<String>,
    pub time: Option<String>,
}

impl BookingRequest {
    /// Trims and validates the submission, then stamps a new id and
    /// creation time onto it.
    pub fn into_booking(self) -> Result<Booking> {
        let name = trimmed(self.name);
        let phone = trimmed(self.phone);
        let tests = trimmed(self.tests);
        let address = trimmed(self.address);
        let time = trimmed(self.time);

        if !is_non_empty_text(&name)
            || !is_phone_like(&phone)
            || !is_non_empty_text(&tests)
            || !is_non_empty_text(&address)
        {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        if !is_optional_date(&time) {
            return Err(AppError::Validation(INVALID_TIME_MESSAGE.to_string()));
        }

        Ok(Booking {
            id: new_record_id(),
            name,
            phone,
            tests,
            address,
            time: if time.is_empty() { None } else { Some(time) },
            created_at: created_at_now(),
        })
    }
}
