use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::handlers::conferences::parse_id;
use crate::handlers::uploads::{store_image, FormData};
use crate::models::{
    CreateStaffMember, ImageUploadForm, StaffMember, UpdateStaffMember, UploadResponse,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "staff",
    responses(
        (status = 200, description = "Staff profiles, newest first", body = Vec<StaffMember>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_staff(State(state): State<AppState>) -> Result<Json<Vec<StaffMember>>, AppError> {
    let staff = sqlx::query_as::<_, StaffMember>("SELECT * FROM staff ORDER BY created_at DESC")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(staff))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    tag = "staff",
    params(("id" = String, Path, description = "Staff member ID (UUID)")),
    responses(
        (status = 200, description = "Staff member found", body = StaffMember),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn get_staff_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StaffMember>, AppError> {
    let id = parse_id(&id)?;
    let member = sqlx::query_as::<_, StaffMember>("SELECT * FROM staff WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Staff member not found"))?;
    Ok(Json(member))
}

#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "staff",
    request_body = CreateStaffMember,
    responses(
        (status = 201, description = "Staff member created", body = StaffMember),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_staff_member(
    State(state): State<AppState>,
    Json(new_member): Json<CreateStaffMember>,
) -> Result<(StatusCode, Json<StaffMember>), AppError> {
    if new_member.full_name.trim().is_empty() || new_member.role.trim().is_empty() {
        return Err(AppError::BadRequest("full_name and role are required".to_string()));
    }

    let member = sqlx::query_as::<_, StaffMember>(
        r#"
        INSERT INTO staff (full_name, role, education, email, bio, image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(new_member.full_name.trim())
    .bind(new_member.role.trim())
    .bind(&new_member.education)
    .bind(&new_member.email)
    .bind(&new_member.bio)
    .bind(&new_member.image)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    tag = "staff",
    params(("id" = String, Path, description = "Staff member ID (UUID)")),
    request_body = UpdateStaffMember,
    responses(
        (status = 200, description = "Staff member updated", body = StaffMember),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn update_staff_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateStaffMember>,
) -> Result<Json<StaffMember>, AppError> {
    let id = parse_id(&id)?;
    let member = sqlx::query_as::<_, StaffMember>(
        r#"
        UPDATE staff
        SET
            full_name = COALESCE($1, full_name),
            role = COALESCE($2, role),
            education = COALESCE($3, education),
            email = COALESCE($4, email),
            bio = COALESCE($5, bio),
            image = COALESCE($6, image),
            updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&update.full_name)
    .bind(&update.role)
    .bind(&update.education)
    .bind(&update.email)
    .bind(&update.bio)
    .bind(&update.image)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Staff member not found"))?;

    Ok(Json(member))
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "staff",
    params(("id" = String, Path, description = "Staff member ID (UUID)")),
    responses(
        (status = 200, description = "Staff member deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn delete_staff_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let result = sqlx::query("DELETE FROM staff WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Staff member not found"));
    }

    Ok(Json(json!({ "message": "Deleted" })))
}

#[utoipa::path(
    post,
    path = "/api/staff/upload",
    tag = "staff",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No image or not an image"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn upload_staff_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = FormData::read(multipart).await?;
    let image = form
        .image
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("image file is required".to_string()))?;

    let url = store_image(&state.upload_dir, "staff", image).await?;
    Ok(Json(UploadResponse { url }))
}
