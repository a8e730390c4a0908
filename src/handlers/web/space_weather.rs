use askama::Template;
use axum::http::StatusCode;
use axum::response::Response;

use super::render;

#[derive(Template)]
#[template(path = "space_weather.html")]
struct SpaceWeatherTemplate {}

pub async fn space_weather() -> Result<Response, StatusCode> {
    render(&SpaceWeatherTemplate {})
}
