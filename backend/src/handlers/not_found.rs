use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{settings::Settings, urls, AppState};

/// Fallback for every request no route matched.
///
/// Slashless GET/HEAD requests whose slashed form is routed get a permanent
/// redirect when `append_slash` is on. Everything else is a 404, with the
/// tried patterns listed when `debug` is on.
pub async fn not_found(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    let settings = &state.settings;

    if settings.append_slash && (method == Method::GET || method == Method::HEAD) {
        if let Some(location) = slash_redirect(&uri, &urls::urlpatterns(settings)) {
            tracing::debug!(from = %uri, to = %location, "Appending slash");
            return (
                StatusCode::MOVED_PERMANENTLY,
                [(header::LOCATION, location)],
            )
                .into_response();
        }
    }

    if settings.debug {
        (StatusCode::NOT_FOUND, debug_page(&method, &uri, settings)).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}

/// Location to redirect to when `uri` plus a trailing slash is an exact route.
fn slash_redirect(uri: &Uri, patterns: &[String]) -> Option<String> {
    let path = uri.path();
    if path.ends_with('/') {
        return None;
    }

    let slashed = format!("{}/", path);
    if !patterns.iter().any(|p| *p == slashed) {
        return None;
    }

    Some(match uri.query() {
        Some(query) => format!("{}?{}", slashed, query),
        None => slashed,
    })
}

fn debug_page(method: &Method, uri: &Uri, settings: &Settings) -> String {
    let mut page = format!(
        "Page not found (404)\nRequest Method: {}\nRequest URL: {}\n\nURL patterns tried, in this order:\n",
        method, uri
    );
    for pattern in urls::urlpatterns(settings) {
        page.push_str(&format!("  {}\n", pattern));
    }
    page.push_str(&format!(
        "\nThe current path, {}, didn't match any of these.\n",
        uri.path()
    ));
    page
}
