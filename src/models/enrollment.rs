use serde::{Deserialize, Serialize};

/// Enrollment row from POST /enrollments/by-user, joined with its career.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub career_id: i64,
    pub career_name: String,
    #[serde(rename = "inicio_cursado", default)]
    pub start_date: Option<String>,
}

/// Payload for POST /enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub user_id: i64,
    pub career_id: i64,
}

/// Body of POST /enrollments/by-user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentsByUser {
    pub user_id: i64,
    pub page: u32,
    pub page_size: u32,
}
