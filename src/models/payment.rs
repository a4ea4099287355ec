use serde::{Deserialize, Serialize};

/// Payment row from the global payments list, a flattened join of the
/// payment with its student and career. The join fields are optional since
/// per-enrollment listings return the bare payment only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(rename = "numero_cuota")]
    pub installment: i32,
    #[serde(rename = "fecha_pago", default)]
    pub paid_at: Option<String>,
    #[serde(rename = "monto", default)]
    pub amount: i64,
    #[serde(rename = "adelantado", default)]
    pub prepaid: bool,
    #[serde(rename = "anulado", default)]
    pub cancelled: bool,
    #[serde(rename = "id_usuarioxcarrera", default)]
    pub enrollment_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub career_id: Option<i64>,
    #[serde(default)]
    pub career_name: Option<String>,
}

/// Payload for POST /payments. The backend computes the amount from the
/// career's price history at the payment date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    #[serde(rename = "id_usuarioxcarrera")]
    pub enrollment_id: i64,
    #[serde(rename = "numero_cuota")]
    pub installment: i32,
    #[serde(rename = "fecha_pago", skip_serializing_if = "Option::is_none", default)]
    pub paid_at: Option<String>,
    #[serde(rename = "adelantado", default)]
    pub prepaid: bool,
}

/// Body of POST /payments/by-enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsByEnrollment {
    #[serde(rename = "id_usuarioxcarrera")]
    pub enrollment_id: i64,
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "include_anulados")]
    pub include_cancelled: bool,
}

/// Body of PUT /payments/{id}/cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCancel {
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}
