use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::{log_db_error, render};
use crate::handlers::research::{fetch_by_kind, PublicationQuery};
use crate::models::{ResearchItem, ResearchKind};
use crate::state::AppState;
use crate::utils::{available_years, filter_publications, format_publication_date};

/// Publication prepared for display
pub(crate) struct PublicationRow {
    pub(crate) title: String,
    pub(crate) authors: String,
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) link: String,
}

impl From<ResearchItem> for PublicationRow {
    fn from(item: ResearchItem) -> Self {
        PublicationRow {
            title: item.title,
            authors: item.authors.unwrap_or_default(),
            date: item.date.as_deref().map(format_publication_date).unwrap_or_default(),
            description: item.description.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
        }
    }
}

struct YearOption {
    year: i32,
    selected: bool,
}

#[derive(Template)]
#[template(path = "publications.html")]
struct PublicationsTemplate {
    search: String,
    years: Vec<YearOption>,
    publications: Vec<PublicationRow>,
    total: usize,
}

pub async fn publications_page(
    Query(query): Query<PublicationQuery>,
    State(state): State<AppState>,
) -> Result<Response, StatusCode> {
    let all = fetch_by_kind(&state.pool, ResearchKind::Publication)
        .await
        .map_err(log_db_error)?;

    let total = all.len();
    let years = available_years(&all)
        .into_iter()
        .map(|year| YearOption { year, selected: query.year == Some(year) })
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let publications = filter_publications(all, query.search.as_deref(), query.year)
        .into_iter()
        .map(PublicationRow::from)
        .collect();

    render(&PublicationsTemplate { search, years, publications, total })
}
