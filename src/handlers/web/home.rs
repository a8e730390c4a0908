use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::{log_db_error, render, ConferenceCard};
use crate::handlers::conferences::load_listing;
use crate::handlers::research::fetch_by_kind;
use crate::models::{Event, ResearchKind};
use crate::state::AppState;
use crate::utils::{recent_publications, Listing, RECENT_PUBLICATIONS};

use super::publications::PublicationRow;

const HOME_CONFERENCES: usize = 3;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    upcoming: Vec<ConferenceCard>,
    publications: Vec<PublicationRow>,
    events: Vec<Event>,
}

pub async fn home(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let upcoming = load_listing(&state.pool, Listing::Upcoming)
        .await
        .map_err(log_db_error)?
        .into_iter()
        .take(HOME_CONFERENCES)
        .map(ConferenceCard::from)
        .collect();

    let publications = fetch_by_kind(&state.pool, ResearchKind::Publication)
        .await
        .map_err(log_db_error)?;
    let publications = recent_publications(publications, None, RECENT_PUBLICATIONS)
        .into_iter()
        .map(PublicationRow::from)
        .collect();

    let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY title LIMIT 6")
        .fetch_all(&state.pool)
        .await
        .map_err(log_db_error)?;

    render(&HomeTemplate { upcoming, publications, events })
}
