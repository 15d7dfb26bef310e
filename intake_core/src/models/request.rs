//! Response bodies shared by the submission and admin endpoints

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true, id: None }
    }

    pub fn with_id(id: String) -> Self {
        Self { ok: true, id: Some(id) }
    }
}
