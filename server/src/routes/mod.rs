//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API, the panel websocket, and Leptos SSR pages
//! under a single Axum router. Page requests pass through the session guard
//! before rendering; any path that is neither an API route nor a known page
//! redirects to the dashboard.

pub mod auth;
pub mod error;
pub mod panels;
pub mod ws;

use std::path::PathBuf;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post, put};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use ::panels::route::{DASHBOARD_PATH, Resolution, decide};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API and websocket routes.
pub(crate) fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/me", get(auth::me))
        .route("/api/panels", get(panels::list_panels).patch(panels::patch_panels))
        .route("/api/panels/stream", get(ws::panel_stream))
        .route("/api/panels/{key}", put(panels::put_panel))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// API only, for when no frontend build is available.
pub fn api_app(state: AppState) -> Router {
    with_layers(api_routes(state).fallback(fallback))
}

/// API routes + guarded Leptos SSR pages + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let pages = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .route_layer(middleware::from_fn_with_state(state.clone(), page_guard))
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(with_layers(
        api_routes(state)
            .merge(pages)
            .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
            .fallback(fallback),
    ))
}

fn with_layers(router: Router) -> Router {
    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Where a page request should go instead of rendering, if anywhere.
pub(crate) async fn page_redirect(state: &AppState, jar: &CookieJar, path: &str) -> Option<&'static str> {
    let account = auth::session_account(state, jar).await;
    match decide(path, account.as_ref()) {
        Resolution::Render(_) => None,
        Resolution::Redirect(to) => Some(to),
    }
}

async fn page_guard(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    match page_redirect(&state, &jar, req.uri().path()).await {
        Some(to) => Redirect::temporary(to).into_response(),
        None => next.run(req).await,
    }
}

/// Unknown API paths are 404; unknown pages go to the dashboard.
async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") || path == DASHBOARD_PATH {
        return StatusCode::NOT_FOUND.into_response();
    }
    Redirect::temporary(DASHBOARD_PATH).into_response()
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
