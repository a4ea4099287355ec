use serde::{Deserialize, Serialize};

/// News feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for POST /news.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    #[serde(rename = "id_admin")]
    pub admin_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
}

/// Payload for PUT /news/{id}. The author never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsUpdate {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
}
