use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::uploads::{discard_image, parse_form_date, store_image, FormData};
use crate::models::{
    Conference, ConferenceForm, ConferenceStatus, CreateConference, DeclaredType, UpdateConference,
};
use crate::state::AppState;
use crate::utils::{resolve_for_create, resolve_for_update, select_listing, Listing};

const UPLOAD_AREA: &str = "conferences";

/// Parse a path id, mapping malformed ids to 400
pub(crate) fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid id '{}'", id)))
}

async fn fetch_active(pool: &PgPool) -> Result<Vec<Conference>, AppError> {
    let conferences = sqlx::query_as::<_, Conference>(
        "SELECT * FROM conferences WHERE is_active ORDER BY start_date DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(conferences)
}

/// Active conferences for one listing, classified against the current time
pub async fn load_listing(pool: &PgPool, listing: Listing) -> Result<Vec<Conference>, AppError> {
    let now = Utc::now();
    Ok(select_listing(fetch_active(pool).await?, listing, now))
}

async fn fetch_conference(pool: &PgPool, id: Uuid) -> Result<Conference, AppError> {
    sqlx::query_as::<_, Conference>("SELECT * FROM conferences WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Conference not found"))
}

#[utoipa::path(
    get,
    path = "/api/conferences",
    tag = "conferences",
    responses(
        (status = 200, description = "All active conferences, newest first", body = Vec<Conference>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_conferences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Conference>>, AppError> {
    Ok(Json(load_listing(&state.pool, Listing::All).await?))
}

#[utoipa::path(
    get,
    path = "/api/conferences/upcoming",
    tag = "conferences",
    responses(
        (status = 200, description = "Active conferences that have not ended, soonest first", body = Vec<Conference>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_upcoming_conferences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Conference>>, AppError> {
    Ok(Json(load_listing(&state.pool, Listing::Upcoming).await?))
}

#[utoipa::path(
    get,
    path = "/api/conferences/past",
    tag = "conferences",
    responses(
        (status = 200, description = "Active conferences that have ended, most recent first", body = Vec<Conference>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_past_conferences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Conference>>, AppError> {
    Ok(Json(load_listing(&state.pool, Listing::Past).await?))
}

#[utoipa::path(
    get,
    path = "/api/conferences/{id}",
    tag = "conferences",
    params(("id" = Uuid, Path, description = "Conference ID")),
    responses(
        (status = 200, description = "Conference found", body = Conference),
        (status = 404, description = "Conference not found"),
        (status = 400, description = "Invalid ID format")
    )
)]
pub async fn get_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Conference>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(fetch_conference(&state.pool, id).await?))
}

fn optional_text(form: &FormData, names: &[&str]) -> Option<String> {
    form.text(names)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Present-but-blank clears an optional field; absent leaves it untouched
fn optional_update(form: &FormData, names: &[&str]) -> Option<Option<String>> {
    form.text(names).map(|_| optional_text(form, names))
}

fn parse_field<T>(form: &FormData, names: &[&str]) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = String>,
{
    form.text(names)
        .map(|raw| raw.parse::<T>().map_err(AppError::BadRequest))
        .transpose()
}

fn parse_date_field(raw: &str, name: &str) -> Result<chrono::DateTime<Utc>, AppError> {
    parse_form_date(raw).ok_or_else(|| AppError::BadRequest(format!("Invalid {} '{}'", name, raw)))
}

/// Validate a create form. The image path is filled in by the caller.
pub fn conference_from_form(form: &FormData) -> Result<CreateConference, AppError> {
    let title = optional_text(form, &["title"])
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;

    let start_raw = form
        .text(&["start_date", "date"])
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("start_date is required".to_string()))?;
    let start_date = parse_date_field(start_raw, "start_date")?;

    let end_date = match form.text(&["end_date", "endDate"]).map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_date_field(raw, "end_date")?),
    };

    let declared_type = parse_field::<DeclaredType>(form, &["declared_type", "type"])?
        .ok_or_else(|| AppError::BadRequest("declared_type is required".to_string()))?;
    let status = parse_field::<ConferenceStatus>(form, &["status"])?.unwrap_or_default();

    let organizers = resolve_for_create(
        form.value("organizers").as_ref(),
        form.value("organizer").as_ref(),
    );

    Ok(CreateConference {
        title,
        description: optional_text(form, &["description"]),
        start_date,
        end_date,
        location: optional_text(form, &["location"]),
        declared_type,
        status,
        image: String::new(),
        registration_link: optional_text(form, &["registration_link", "registrationLink"])
            .unwrap_or_default(),
        website: optional_text(form, &["website"]).unwrap_or_default(),
        organizers,
    })
}

/// Validate an update form. Omitted fields leave stored values untouched.
pub fn update_from_form(form: &FormData) -> Result<UpdateConference, AppError> {
    let title = match form.text(&["title"]).map(str::trim) {
        None => None,
        Some("") => return Err(AppError::BadRequest("title cannot be empty".to_string())),
        Some(title) => Some(title.to_string()),
    };

    let start_date = form
        .text(&["start_date", "date"])
        .map(|raw| parse_date_field(raw, "start_date"))
        .transpose()?;

    let end_date = match form.text(&["end_date", "endDate"]).map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(raw) => Some(Some(parse_date_field(raw, "end_date")?)),
    };

    let is_active = match form.text(&["is_active", "isActive"]).map(str::trim) {
        None => None,
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        Some(other) => return Err(AppError::BadRequest(format!("Invalid is_active '{}'", other))),
    };

    Ok(UpdateConference {
        title,
        description: optional_update(form, &["description"]),
        start_date,
        end_date,
        location: optional_update(form, &["location"]),
        declared_type: parse_field(form, &["declared_type", "type"])?,
        status: parse_field(form, &["status"])?,
        image: None,
        registration_link: form
            .text(&["registration_link", "registrationLink"])
            .map(|s| s.trim().to_string()),
        website: form.text(&["website"]).map(|s| s.trim().to_string()),
        organizers: resolve_for_update(
            form.value("organizers").as_ref(),
            form.value("organizer").as_ref(),
        ),
        is_active,
    })
}

#[utoipa::path(
    post,
    path = "/api/conferences",
    tag = "conferences",
    request_body(content = ConferenceForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Conference created", body = Conference),
        (status = 400, description = "Invalid form"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_conference(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Conference>), AppError> {
    let form = FormData::read(multipart).await?;
    let mut new_conference = conference_from_form(&form)?;

    let stored_image = match &form.image {
        Some(image) => Some(store_image(&state.upload_dir, UPLOAD_AREA, image).await?),
        None => None,
    };
    if let Some(path) = &stored_image {
        new_conference.image = path.clone();
    }

    let inserted = sqlx::query_as::<_, Conference>(
        r#"
        INSERT INTO conferences (
            title, description, start_date, end_date, location,
            declared_type, status, image, registration_link, website, organizers
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&new_conference.title)
    .bind(&new_conference.description)
    .bind(new_conference.start_date)
    .bind(new_conference.end_date)
    .bind(&new_conference.location)
    .bind(new_conference.declared_type)
    .bind(new_conference.status)
    .bind(&new_conference.image)
    .bind(&new_conference.registration_link)
    .bind(&new_conference.website)
    .bind(&new_conference.organizers)
    .fetch_one(&state.pool)
    .await;

    let conference = match inserted {
        Ok(conference) => conference,
        Err(e) => {
            if let Some(path) = &stored_image {
                discard_image(&state.upload_dir, path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!("Created conference {} ({})", conference.id, conference.title);
    Ok((StatusCode::CREATED, Json(conference)))
}

#[utoipa::path(
    put,
    path = "/api/conferences/{id}",
    tag = "conferences",
    params(("id" = Uuid, Path, description = "Conference ID")),
    request_body(content = ConferenceForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Conference updated", body = Conference),
        (status = 400, description = "Invalid form or ID"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn update_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Conference>, AppError> {
    let id = parse_id(&id)?;
    let form = FormData::read(multipart).await?;
    let mut update = update_from_form(&form)?;

    let existing = fetch_conference(&state.pool, id).await?;

    if let Some(image) = &form.image {
        update.image = Some(store_image(&state.upload_dir, UPLOAD_AREA, image).await?);
    }
    let stored_image = update.image.clone();

    let merged = update.apply(existing);

    let updated = sqlx::query_as::<_, Conference>(
        r#"
        UPDATE conferences
        SET
            title = $1,
            description = $2,
            start_date = $3,
            end_date = $4,
            location = $5,
            declared_type = $6,
            status = $7,
            image = $8,
            registration_link = $9,
            website = $10,
            organizers = $11,
            is_active = $12,
            updated_at = NOW()
        WHERE id = $13
        RETURNING *
        "#,
    )
    .bind(&merged.title)
    .bind(&merged.description)
    .bind(merged.start_date)
    .bind(merged.end_date)
    .bind(&merged.location)
    .bind(merged.declared_type)
    .bind(merged.status)
    .bind(&merged.image)
    .bind(&merged.registration_link)
    .bind(&merged.website)
    .bind(&merged.organizers)
    .bind(merged.is_active)
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(AppError::from)
    .and_then(|row| row.ok_or(AppError::NotFound("Conference not found")));

    let conference = match updated {
        Ok(conference) => conference,
        Err(e) => {
            if let Some(path) = &stored_image {
                discard_image(&state.upload_dir, path).await;
            }
            return Err(e);
        }
    };

    Ok(Json(conference))
}

#[utoipa::path(
    delete,
    path = "/api/conferences/{id}",
    tag = "conferences",
    params(("id" = Uuid, Path, description = "Conference ID")),
    responses(
        (status = 200, description = "Conference hidden from public listings"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn delete_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let result = sqlx::query(
        "UPDATE conferences SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Conference not found"));
    }

    Ok(Json(json!({ "message": "Conference deleted successfully" })))
}

#[utoipa::path(
    delete,
    path = "/api/conferences/{id}/hard",
    tag = "conferences",
    params(("id" = Uuid, Path, description = "Conference ID")),
    responses(
        (status = 200, description = "Conference permanently deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn hard_delete_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let result = sqlx::query("DELETE FROM conferences WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Conference not found"));
    }

    Ok(Json(json!({ "message": "Conference permanently deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::OrganizersUpdate;
    use chrono::TimeZone;

    #[test]
    fn test_create_form_with_legacy_field_names() {
        let form = FormData::with_fields(&[
            ("title", "  Space Weather Symposium "),
            ("date", "2024-07-15"),
            ("endDate", ""),
            ("type", "upcoming"),
            ("organizers", ""),
            ("organizer", "Alice, Bob"),
        ]);
        let conference = conference_from_form(&form).unwrap();
        assert_eq!(conference.title, "Space Weather Symposium");
        assert_eq!(conference.start_date, Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap());
        assert_eq!(conference.end_date, None);
        assert_eq!(conference.declared_type, DeclaredType::Upcoming);
        assert_eq!(conference.status, ConferenceStatus::Upcoming);
        assert_eq!(conference.organizers, vec!["Alice", "Bob"]);
        assert_eq!(conference.image, "");
    }

    #[test]
    fn test_create_form_requires_title_start_and_type() {
        let missing_title = FormData::with_fields(&[("start_date", "2024-07-15"), ("type", "past")]);
        assert!(matches!(conference_from_form(&missing_title), Err(AppError::BadRequest(_))));

        let missing_start = FormData::with_fields(&[("title", "T"), ("type", "past")]);
        assert!(matches!(conference_from_form(&missing_start), Err(AppError::BadRequest(_))));

        let bad_start = FormData::with_fields(&[("title", "T"), ("start_date", "soon"), ("type", "past")]);
        assert!(matches!(conference_from_form(&bad_start), Err(AppError::BadRequest(_))));

        let missing_type = FormData::with_fields(&[("title", "T"), ("start_date", "2024-07-15")]);
        assert!(matches!(conference_from_form(&missing_type), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_create_form_repeated_organizers() {
        let form = FormData::with_fields(&[
            ("title", "T"),
            ("start_date", "2024-07-15"),
            ("declared_type", "upcoming"),
            ("organizers", "Alice"),
            ("organizers", ""),
            ("organizers", "Bob"),
        ]);
        assert_eq!(conference_from_form(&form).unwrap().organizers, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_update_form_omitting_organizers_keeps_them() {
        let form = FormData::with_fields(&[("title", "Renamed")]);
        let update = update_from_form(&form).unwrap();
        assert_eq!(update.title.as_deref(), Some("Renamed"));
        assert_eq!(update.organizers, OrganizersUpdate::NoChange);
        assert_eq!(update.end_date, None);
        assert_eq!(update.image, None);
    }

    #[test]
    fn test_update_form_clears_end_date_and_description() {
        let form = FormData::with_fields(&[
            ("end_date", ""),
            ("description", "   "),
            ("organizers", r#"["Carol"]"#),
            ("is_active", "false"),
        ]);
        let update = update_from_form(&form).unwrap();
        assert_eq!(update.end_date, Some(None));
        assert_eq!(update.description, Some(None));
        assert_eq!(update.organizers, OrganizersUpdate::Replace(vec!["Carol".into()]));
        assert_eq!(update.is_active, Some(false));
    }

    #[test]
    fn test_update_form_rejects_bad_values() {
        let bad_status = FormData::with_fields(&[("status", "postponed")]);
        assert!(matches!(update_from_form(&bad_status), Err(AppError::BadRequest(_))));

        let empty_title = FormData::with_fields(&[("title", " ")]);
        assert!(matches!(update_from_form(&empty_title), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
