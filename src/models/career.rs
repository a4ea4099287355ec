use serde::{Deserialize, Serialize};

/// Career (study program) as served by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Career {
    pub id: i64,
    pub name: String,
    #[serde(rename = "costo_mensual")]
    pub monthly_cost: i64,
    #[serde(rename = "duracion_meses")]
    pub duration_months: i32,
    #[serde(rename = "inicio_cursado", default)]
    pub start_date: Option<String>,
}

/// Payload for POST /careers and PUT /careers/{id}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCareer {
    pub name: String,
    #[serde(rename = "costo_mensual")]
    pub monthly_cost: i64,
    #[serde(rename = "duracion_meses")]
    pub duration_months: i32,
    #[serde(rename = "inicio_cursado", skip_serializing_if = "Option::is_none", default)]
    pub start_date: Option<String>,
}

/// One entry of a career's price history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPrice {
    pub id: i64,
    #[serde(rename = "monto")]
    pub amount: i64,
    #[serde(rename = "fecha_desde")]
    pub effective_from: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
