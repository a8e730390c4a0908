use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::utils::format_publication_date;

/// Kind of research item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "research_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResearchKind {
    Project,
    Publication,
}

/// A research project or publication
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ResearchItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ResearchKind,
    pub title: String,
    pub description: Option<String>,
    // Projects
    pub category: Option<String>,
    pub image: Option<String>,
    // Publications
    pub authors: Option<String>,
    /// Free text: `YYYY`, `YYYY-MM` or a full date. Interpreted only on read.
    pub date: Option<String>,
    pub link: Option<String>,
}

/// Publication with its date formatted for display
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicationView {
    #[serde(flatten)]
    pub item: ResearchItem,
    /// e.g. "March 2024"
    pub display_date: Option<String>,
}

impl From<ResearchItem> for PublicationView {
    fn from(item: ResearchItem) -> Self {
        let display_date = item.date.as_deref().map(format_publication_date);
        PublicationView { item, display_date }
    }
}

/// Request model for creating a research item
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateResearchItem {
    #[serde(rename = "type")]
    pub kind: ResearchKind,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub authors: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}

/// Request model for updating a research item
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateResearchItem {
    #[serde(rename = "type")]
    pub kind: Option<ResearchKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub authors: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}
