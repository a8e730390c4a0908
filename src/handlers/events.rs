use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::handlers::conferences::parse_id;
use crate::models::{CreateEvent, Event, UpdateEvent};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "events",
    responses((status = 200, description = "All events", body = Vec<Event>))
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY title")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID (UUID)")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Event not found"))?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(new_event): Json<CreateEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    if new_event.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let event = sqlx::query_as::<_, Event>(
        "INSERT INTO events (title, date, description) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(new_event.title.trim())
    .bind(&new_event.date)
    .bind(&new_event.description)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID (UUID)")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateEvent>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;
    let event = sqlx::query_as::<_, Event>(
        r#"
        UPDATE events
        SET
            title = COALESCE($1, title),
            date = COALESCE($2, date),
            description = COALESCE($3, description)
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&update.title)
    .bind(&update.date)
    .bind(&update.description)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Event not found"))?;

    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID (UUID)")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found"));
    }

    Ok(Json(json!({ "message": "Event deleted" })))
}
