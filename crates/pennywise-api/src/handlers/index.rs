use axum::{extract::OriginalUri, response::Html};

use crate::error::ApiError;

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Unknown routes get the JSON error body too
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
