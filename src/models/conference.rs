use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::utils::OrganizersUpdate;

/// Upcoming/past label chosen by the admin at creation.
///
/// Informational only: listings use the computed classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "declared_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    Upcoming,
    Past,
}

/// Lifecycle status stored on the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "conference_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConferenceStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
}

impl std::str::FromStr for DeclaredType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(DeclaredType::Upcoming),
            "past" => Ok(DeclaredType::Past),
            other => Err(format!("invalid conference type '{}'", other)),
        }
    }
}

impl std::str::FromStr for ConferenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(ConferenceStatus::Upcoming),
            "ongoing" => Ok(ConferenceStatus::Ongoing),
            "completed" => Ok(ConferenceStatus::Completed),
            other => Err(format!("invalid conference status '{}'", other)),
        }
    }
}

/// Conference response model (matches database schema)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Conference {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub declared_type: DeclaredType,
    pub status: ConferenceStatus,
    /// Public path of the uploaded image (e.g. /uploads/conferences/...), empty if none
    pub image: String,
    pub registration_link: String,
    pub website: String,
    pub organizers: Vec<String>,
    /// Soft-delete marker; inactive conferences are hidden from public listings
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a conference
#[derive(Debug, Clone)]
pub struct CreateConference {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub declared_type: DeclaredType,
    pub status: ConferenceStatus,
    pub image: String,
    pub registration_link: String,
    pub website: String,
    pub organizers: Vec<String>,
}

/// Partial update of a conference. `None` leaves the stored value untouched.
#[derive(Debug, Clone)]
pub struct UpdateConference {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<DateTime<Utc>>,
    /// `Some(None)` clears the end date
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub location: Option<Option<String>>,
    pub declared_type: Option<DeclaredType>,
    pub status: Option<ConferenceStatus>,
    /// Only set when a new image file was uploaded
    pub image: Option<String>,
    pub registration_link: Option<String>,
    pub website: Option<String>,
    pub organizers: OrganizersUpdate,
    pub is_active: Option<bool>,
}

impl UpdateConference {
    /// Merge this update into an existing record
    pub fn apply(self, existing: Conference) -> Conference {
        Conference {
            title: self.title.unwrap_or(existing.title),
            description: self.description.unwrap_or(existing.description),
            start_date: self.start_date.unwrap_or(existing.start_date),
            end_date: self.end_date.unwrap_or(existing.end_date),
            location: self.location.unwrap_or(existing.location),
            declared_type: self.declared_type.unwrap_or(existing.declared_type),
            status: self.status.unwrap_or(existing.status),
            image: self.image.unwrap_or(existing.image),
            registration_link: self.registration_link.unwrap_or(existing.registration_link),
            website: self.website.unwrap_or(existing.website),
            organizers: self.organizers.apply(existing.organizers),
            is_active: self.is_active.unwrap_or(existing.is_active),
            ..existing
        }
    }
}

/// Multipart form accepted by the conference create/update endpoints
/// (documentation only; the handlers read the form field by field)
#[derive(ToSchema)]
pub struct ConferenceForm {
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339; `date` is accepted as an alias
    pub start_date: String,
    /// `YYYY-MM-DD` or RFC 3339; empty clears it on update; `endDate` is accepted as an alias
    pub end_date: Option<String>,
    pub location: Option<String>,
    /// `upcoming` or `past`; `type` is accepted as an alias
    pub declared_type: String,
    pub status: Option<ConferenceStatus>,
    pub registration_link: Option<String>,
    pub website: Option<String>,
    /// Repeated field, JSON array text, or comma-separated text
    pub organizers: Option<Vec<String>>,
    /// Legacy single-organizer field, used when `organizers` yields nothing
    pub organizer: Option<String>,
    pub is_active: Option<bool>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn existing() -> Conference {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Conference {
            id: Uuid::new_v4(),
            title: "Space Weather Workshop".into(),
            description: Some("Annual workshop".into()),
            start_date: at,
            end_date: Some(at),
            location: Some("Addis Ababa".into()),
            declared_type: DeclaredType::Upcoming,
            status: ConferenceStatus::Upcoming,
            image: "/uploads/conferences/old.png".into(),
            registration_link: String::new(),
            website: String::new(),
            organizers: vec!["Alice".into(), "Bob".into()],
            is_active: true,
            created_at: at,
            updated_at: at,
        }
    }

    fn empty_update() -> UpdateConference {
        UpdateConference {
            title: None,
            description: None,
            start_date: None,
            end_date: None,
            location: None,
            declared_type: None,
            status: None,
            image: None,
            registration_link: None,
            website: None,
            organizers: OrganizersUpdate::NoChange,
            is_active: None,
        }
    }

    #[test]
    fn test_empty_update_keeps_everything() {
        let before = existing();
        let after = empty_update().apply(before.clone());
        assert_eq!(after.title, before.title);
        assert_eq!(after.organizers, before.organizers);
        assert_eq!(after.image, before.image);
        assert_eq!(after.end_date, before.end_date);
    }

    #[test]
    fn test_update_clears_end_date_and_replaces_organizers() {
        let update = UpdateConference {
            end_date: Some(None),
            organizers: OrganizersUpdate::Replace(vec!["Carol".into()]),
            ..empty_update()
        };
        let after = update.apply(existing());
        assert_eq!(after.end_date, None);
        assert_eq!(after.organizers, vec!["Carol"]);
        assert_eq!(after.image, "/uploads/conferences/old.png");
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Past".parse::<DeclaredType>(), Ok(DeclaredType::Past));
        assert_eq!(" ongoing ".parse::<ConferenceStatus>(), Ok(ConferenceStatus::Ongoing));
        assert!("later".parse::<DeclaredType>().is_err());
    }
}
