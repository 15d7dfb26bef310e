use serde::{Deserialize, Serialize};

use super::{created_at_now, new_record_id, trimmed};
use crate::error::{AppError, Result};
use crate::store::{Collection, Record};
use crate::validation::is_non_empty_text;

pub const MISSING_CONTACT_FIELDS_MESSAGE: &str = "Missing fields";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub msg: String,
    pub email: Option<String>,
    pub created_at: String,
}

impl Record for Contact {
    const COLLECTION: Collection = Collection::Contacts;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub msg: Option<String>,
    pub email: Option<String>,
}

impl ContactRequest {
    /// The email is stored as given; an empty one becomes `null`.
    pub fn into_contact(self) -> Result<Contact> {
        let name = trimmed(self.name);
        let msg = trimmed(self.msg);

        if !is_non_empty_text(&name) || !is_non_empty_text(&msg) {
            return Err(AppError::Validation(MISSING_CONTACT_FIELDS_MESSAGE.to_string()));
        }

        Ok(Contact {
            id: new_record_id(),
            name,
            msg,
            email: self.email.filter(|email| !email.is_empty()),
            created_at: created_at_now(),
        })
    }
}
