use serde::{Deserialize, Serialize};

/// User row as the backend returns it in both list and detail responses.
///
/// Detail fields are optional because older accounts may exist without a
/// detail record attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub role: String,
}

/// Payload for POST /users. The password only travels on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: String,
    pub password: String,
}

/// Payload for PUT /users/{id}. Editing never touches the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: String,
}
