use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;

use super::{log_db_error, render, ConferenceCard};
use crate::models::Conference;
use crate::state::AppState;
use crate::utils::{select_listing, Listing};

#[derive(Template)]
#[template(path = "conferences.html")]
struct ConferencesTemplate {
    upcoming: Vec<ConferenceCard>,
    past: Vec<ConferenceCard>,
}

pub async fn conferences_page(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let active = sqlx::query_as::<_, Conference>("SELECT * FROM conferences WHERE is_active")
        .fetch_all(&state.pool)
        .await
        .map_err(log_db_error)?;

    // One clock reading for both sections
    let now = Utc::now();
    let upcoming = select_listing(active.clone(), Listing::Upcoming, now);
    let past = select_listing(active, Listing::Past, now);

    render(&ConferencesTemplate {
        upcoming: upcoming.into_iter().map(ConferenceCard::from).collect(),
        past: past.into_iter().map(ConferenceCard::from).collect(),
    })
}
