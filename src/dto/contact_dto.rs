use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::contact::ContactRecord;

/// Incoming contact form submission as received at the endpoint.
///
/// `empresa` is the honeypot: a hidden field humans never fill. A missing
/// honeypot deserializes to the empty string and is treated as valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub celular: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub empresa: String,
}

/// The wire payload a well-behaved client sends: the four validated fields,
/// honeypot already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub celular: String,
    pub message: String,
}

impl ContactRequest {
    /// Drop the honeypot, keeping the four transmitted fields.
    pub fn into_payload(self) -> ContactPayload {
        ContactPayload {
            name: self.name,
            email: self.email,
            celular: self.celular,
            message: self.message,
        }
    }
}

/// Successful submission response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitContactResponse {
    pub success: bool,
    pub data: ContactRecord,
    pub email: String,
}

/// Per-field validation error map, keyed by request field name
pub type FieldErrors = BTreeMap<&'static str, String>;
