use serde::{Deserialize, Serialize};

/// GET /alumno/perfil payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
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
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
}

/// One career the student is enrolled in, from GET /alumno/carreras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCareer {
    #[serde(rename = "id_inscripcion")]
    pub enrollment_id: i64,
    #[serde(rename = "carrera_id", default)]
    pub career_id: Option<i64>,
    #[serde(rename = "carrera_nombre", default)]
    pub career_name: Option<String>,
    #[serde(rename = "costo_mensual", default)]
    pub monthly_cost: Option<i64>,
    #[serde(rename = "duracion_meses", default)]
    pub duration_months: Option<i32>,
    #[serde(rename = "fecha_inscripcion", default)]
    pub enrolled_at: Option<String>,
}

/// Wrapper object of GET /alumno/carreras.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCareers {
    #[serde(rename = "carreras")]
    pub careers: Vec<StudentCareer>,
}

/// One of the student's own payments, from GET /alumno/pagos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentPayment {
    #[serde(rename = "id_pago")]
    pub payment_id: i64,
    #[serde(rename = "id_inscripcion")]
    pub enrollment_id: i64,
    #[serde(rename = "carrera_id", default)]
    pub career_id: Option<i64>,
    #[serde(rename = "carrera_nombre", default)]
    pub career_name: Option<String>,
    #[serde(rename = "numero_cuota")]
    pub installment: i32,
    #[serde(rename = "monto")]
    pub amount: i64,
    #[serde(rename = "adelantado", default)]
    pub prepaid: bool,
    #[serde(rename = "anulado", default)]
    pub cancelled: bool,
    #[serde(rename = "fecha_pago", default)]
    pub paid_at: Option<String>,
}

/// Wrapper object of GET /alumno/pagos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentPayments {
    #[serde(rename = "pagos")]
    pub payments: Vec<StudentPayment>,
}
