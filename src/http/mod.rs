//! HTTP boundary: axum router exposing the storefront API. Each protected
//! route declares its authorization explicitly — resolve the principal,
//! then apply the role gate where required — before touching any actor.

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, header::CONTENT_TYPE, HeaderMap, Method},
    routing::{get, post, put},
    Router,
};
use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{signal, SignalKind},
    },
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::clients::{CatalogClient, DirectoryClient, ReviewClient};
use crate::config::Config;

pub struct AppState {
    pub token_secret: String,
    pub directory: DirectoryClient,
    pub catalog: CatalogClient,
    pub reviews: ReviewClient,
}

/// Extract the signed credential from the request's `token` cookie.
pub fn credential_from(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix("token=")
            .map(|value| value.to_string())
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/v1/products", get(routes::list_products))
        .route("/api/v1/product/{id}", get(routes::product_detail))
        .route("/api/v1/admin/product/new", post(routes::create_product))
        .route(
            "/api/v1/admin/product/{id}",
            put(routes::update_product).delete(routes::delete_product),
        )
        .route(
            "/api/v1/admin/multiple/product",
            post(routes::remove_products),
        )
        .route("/api/v1/review", put(routes::submit_review))
        .route(
            "/api/v1/reviews",
            get(routes::list_reviews).delete(routes::delete_review),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: Config, state: Arc<AppState>) {
    let app = router(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind listener");
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    info!("Server shutting down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn credential_is_read_from_the_token_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session=abc; token=tok123; theme=dark"),
        );
        assert_eq!(credential_from(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn absent_or_foreign_cookies_yield_no_credential() {
        assert_eq!(credential_from(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));
        assert_eq!(credential_from(&headers), None);
    }
}
