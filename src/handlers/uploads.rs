//! Multipart form reading and image storage.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;

/// An image file received in a multipart form
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Text fields and the optional `image` file of a multipart form
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    pub image: Option<UploadedImage>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            // `organizers[]` and `organizers` are the same field
            let name = field.name().unwrap_or_default().trim_end_matches("[]").to_string();

            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;

                // Browsers send an empty part when no file was chosen
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.image = Some(UploadedImage { file_name, content_type, bytes });
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form.fields.entry(name).or_default().push(value);
        }

        Ok(form)
    }

    /// First value of the first field present among `names`
    pub fn text(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|name| self.fields.get(*name))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Field as JSON: a single value is text, a repeated field is a list
    pub fn value(&self, name: &str) -> Option<Value> {
        let values = self.fields.get(name)?;
        match values.as_slice() {
            [] => None,
            [single] => Some(Value::String(single.clone())),
            many => Some(Value::Array(many.iter().cloned().map(Value::String).collect())),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_fields(pairs: &[(&str, &str)]) -> Self {
        let mut form = FormData::default();
        for (name, value) in pairs {
            form.fields.entry(name.to_string()).or_default().push(value.to_string());
        }
        form
    }
}

/// Parse a date from a form field: `YYYY-MM-DD` (midnight UTC),
/// `YYYY-MM-DDTHH:MM` (datetime-local, UTC) or RFC 3339.
pub fn parse_form_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Keep a client-supplied file name safe to use as a path component
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Write an uploaded image under `<upload_dir>/<area>/` and return its public
/// path (`/uploads/<area>/<file>`). Only `image/*` content types are accepted.
pub async fn store_image(
    upload_dir: &Path,
    area: &str,
    image: &UploadedImage,
) -> Result<String, AppError> {
    if !image.content_type.starts_with("image/") {
        return Err(AppError::BadRequest("Only image files are allowed!".to_string()));
    }

    let dir = upload_dir.join(area);
    tokio::fs::create_dir_all(&dir).await?;

    let unique = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        &Uuid::new_v4().simple().to_string()[..8]
    );
    let file_name = format!("{}-{}", unique, sanitize_file_name(&image.file_name));
    tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

    tracing::info!("Stored {} byte image at {}/{}", image.bytes.len(), area, file_name);
    Ok(format!("/uploads/{}/{}", area, file_name))
}

/// Remove an image written by [`store_image`] whose record was never saved.
/// Paths outside `/uploads/` are ignored; removal failures are only logged.
pub async fn discard_image(upload_dir: &Path, public_path: &str) {
    let Some(relative) = public_path.strip_prefix("/uploads/") else {
        return;
    };
    if relative.split('/').any(|part| part == "..") {
        return;
    }
    if let Err(e) = tokio::fs::remove_file(upload_dir.join(relative)).await {
        tracing::warn!("Could not remove orphaned upload {}: {}", public_path, e);
    }
}
