use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{handlers, middleware, settings::Settings, AppState};

/// Exact routes, in the order they are registered.
pub const ROUTES: &[&str] = &["/", "/health/"];

/// URL patterns in the order they are tried.
pub fn urlpatterns(settings: &Settings) -> Vec<String> {
    ROUTES
        .iter()
        .map(|r| r.to_string())
        .chain(std::iter::once(format!("{}<path>", settings.static_url)))
        .collect()
}

/// Build the application router with its middleware stack.
///
/// Layers run outermost first: tracing, CORS, host validation.
pub fn router(state: Arc<AppState>) -> Router {
    let settings = &state.settings;

    let app = Router::new()
        .route(ROUTES[0], get(handlers::home::home))
        .route(ROUTES[1], get(handlers::health::health))
        .nest_service(
            &settings.static_mount(),
            ServeDir::new(&settings.static_root),
        )
        .fallback(handlers::not_found::not_found)
        .layer(from_fn_with_state(state.clone(), middleware::validate_host))
        .with_state(state.clone());

    let app = if state.settings.cors_allow_all_origins {
        app.layer(middleware::cors_allow_all())
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}
