use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Staff profile
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct StaffMember {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
    pub education: String,
    pub email: String,
    pub bio: String,
    /// Image URL as returned by the staff upload endpoint
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a staff profile
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStaffMember {
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
}

/// Request model for updating a staff profile
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStaffMember {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub education: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Response of the staff image upload endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
}

/// Multipart form of the staff image upload endpoint (documentation only)
#[derive(ToSchema)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
