pub mod home;
pub mod conferences;
pub mod publications;
pub mod staff;
pub mod space_weather;

pub use home::*;
pub use conferences::*;
pub use publications::*;
pub use staff::*;
pub use space_weather::*;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};

use crate::models::Conference;

fn render<T: Template>(template: &T) -> Result<Response, StatusCode> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn log_db_error<E: std::fmt::Display>(e: E) -> StatusCode {
    tracing::error!("Database error: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Conference prepared for display
pub(crate) struct ConferenceCard {
    title: String,
    dates: String,
    location: String,
    description: String,
    image: String,
    website: String,
    registration_link: String,
    organizers: String,
}

fn day(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

impl From<Conference> for ConferenceCard {
    fn from(c: Conference) -> Self {
        let dates = match c.end_date {
            Some(end) if end.date_naive() != c.start_date.date_naive() => {
                format!("{} - {}", day(c.start_date), day(end))
            }
            _ => day(c.start_date),
        };
        ConferenceCard {
            title: c.title,
            dates,
            location: c.location.unwrap_or_else(|| String::from("-")),
            description: c.description.unwrap_or_default(),
            image: c.image,
            website: c.website,
            registration_link: c.registration_link,
            organizers: c.organizers.join(", "),
        }
    }
}
