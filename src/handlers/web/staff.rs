use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use uuid::Uuid;

use super::{log_db_error, render};
use crate::models::StaffMember;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "staff_list.html")]
struct StaffListTemplate {
    staff: Vec<StaffMember>,
}

#[derive(Template)]
#[template(path = "staff_detail.html")]
struct StaffDetailTemplate {
    member: StaffMember,
}

pub async fn staff_page(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let staff = sqlx::query_as::<_, StaffMember>("SELECT * FROM staff ORDER BY created_at DESC")
        .fetch_all(&state.pool)
        .await
        .map_err(log_db_error)?;

    render(&StaffListTemplate { staff })
}

pub async fn staff_profile(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, StatusCode> {
    let id = Uuid::parse_str(&id).map_err(|_| StatusCode::NOT_FOUND)?;

    let member = sqlx::query_as::<_, StaffMember>("SELECT * FROM staff WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await
        .map_err(log_db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    render(&StaffDetailTemplate { member })
}
