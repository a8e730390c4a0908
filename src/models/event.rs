use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// News item / event shown on the home page
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEvent {
    pub title: String,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}
