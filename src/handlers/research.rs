use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::handlers::conferences::parse_id;
use crate::models::{
    CreateResearchItem, PublicationView, ResearchItem, ResearchKind, UpdateResearchItem,
};
use crate::state::AppState;
use crate::utils::{filter_publications, recent_publications, RECENT_PUBLICATIONS};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicationQuery {
    /// Case- and accent-insensitive search over title, authors and description
    pub search: Option<String>,
    /// Only publications from this year
    pub year: Option<i32>,
}

pub async fn fetch_by_kind(pool: &PgPool, kind: ResearchKind) -> Result<Vec<ResearchItem>, AppError> {
    let items = sqlx::query_as::<_, ResearchItem>(
        "SELECT * FROM research WHERE kind = $1 ORDER BY title",
    )
    .bind(kind)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

#[utoipa::path(
    get,
    path = "/api/research",
    tag = "research",
    responses(
        (status = 200, description = "All projects and publications", body = Vec<ResearchItem>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_research(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResearchItem>>, AppError> {
    let items = sqlx::query_as::<_, ResearchItem>("SELECT * FROM research ORDER BY kind, title")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/research/projects",
    tag = "research",
    responses(
        (status = 200, description = "Research projects", body = Vec<ResearchItem>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResearchItem>>, AppError> {
    Ok(Json(fetch_by_kind(&state.pool, ResearchKind::Project).await?))
}

#[utoipa::path(
    get,
    path = "/api/research/publications",
    tag = "research",
    params(PublicationQuery),
    responses(
        (status = 200, description = "Publications, newest first", body = Vec<PublicationView>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_publications(
    State(state): State<AppState>,
    Query(query): Query<PublicationQuery>,
) -> Result<Json<Vec<PublicationView>>, AppError> {
    let publications = fetch_by_kind(&state.pool, ResearchKind::Publication).await?;
    let filtered = filter_publications(publications, query.search.as_deref(), query.year);
    Ok(Json(filtered.into_iter().map(PublicationView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/research/publications/recent",
    tag = "research",
    params(PublicationQuery),
    responses(
        (status = 200, description = "The five most recent publications, search applied after the cut", body = Vec<PublicationView>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_recent_publications(
    State(state): State<AppState>,
    Query(query): Query<PublicationQuery>,
) -> Result<Json<Vec<PublicationView>>, AppError> {
    let publications = fetch_by_kind(&state.pool, ResearchKind::Publication).await?;
    let recent = recent_publications(publications, query.search.as_deref(), RECENT_PUBLICATIONS);
    Ok(Json(recent.into_iter().map(PublicationView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/research/{id}",
    tag = "research",
    params(("id" = String, Path, description = "Research item ID (UUID)")),
    responses(
        (status = 200, description = "Research item found", body = ResearchItem),
        (status = 404, description = "Research item not found")
    )
)]
pub async fn get_research_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResearchItem>, AppError> {
    let id = parse_id(&id)?;
    let item = sqlx::query_as::<_, ResearchItem>("SELECT * FROM research WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Not found"))?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/research",
    tag = "research",
    request_body = CreateResearchItem,
    responses(
        (status = 201, description = "Research item created", body = ResearchItem),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_research_item(
    State(state): State<AppState>,
    Json(new_item): Json<CreateResearchItem>,
) -> Result<(StatusCode, Json<ResearchItem>), AppError> {
    if new_item.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let item = sqlx::query_as::<_, ResearchItem>(
        r#"
        INSERT INTO research (kind, title, description, category, image, authors, date, link)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(new_item.kind)
    .bind(new_item.title.trim())
    .bind(&new_item.description)
    .bind(&new_item.category)
    .bind(&new_item.image)
    .bind(&new_item.authors)
    .bind(&new_item.date)
    .bind(&new_item.link)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/research/{id}",
    tag = "research",
    params(("id" = String, Path, description = "Research item ID (UUID)")),
    request_body = UpdateResearchItem,
    responses(
        (status = 200, description = "Research item updated", body = ResearchItem),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Research item not found")
    )
)]
pub async fn update_research_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateResearchItem>,
) -> Result<Json<ResearchItem>, AppError> {
    let id = parse_id(&id)?;
    let item = sqlx::query_as::<_, ResearchItem>(
        r#"
        UPDATE research
        SET
            kind = COALESCE($1, kind),
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            category = COALESCE($4, category),
            image = COALESCE($5, image),
            authors = COALESCE($6, authors),
            date = COALESCE($7, date),
            link = COALESCE($8, link)
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(update.kind)
    .bind(&update.title)
    .bind(&update.description)
    .bind(&update.category)
    .bind(&update.image)
    .bind(&update.authors)
    .bind(&update.date)
    .bind(&update.link)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Not found"))?;

    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/research/{id}",
    tag = "research",
    params(("id" = String, Path, description = "Research item ID (UUID)")),
    responses(
        (status = 200, description = "Research item deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Research item not found")
    )
)]
pub async fn delete_research_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let result = sqlx::query("DELETE FROM research WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Not found"));
    }

    Ok(Json(json!({ "message": "Deleted successfully" })))
}
