use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A persisted contact submission.
///
/// Field names match the `contactos` collection schema; `creado_el` is
/// assigned by the repository at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub nombre: String,
    pub correo: String,
    pub celular: String,
    pub mensaje: String,
    pub creado_el: Option<String>,
}
