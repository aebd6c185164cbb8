//! Local HTTP front for the handler, for running outside a serverless host.

use std::net::SocketAddr;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{GuestlogError, Result};
use crate::handler::MessageAppender;
use crate::model::{FunctionRequest, FunctionResponse};

pub const DEFAULT_ROUTE: &str = "/append-message";
const HEALTH_ROUTE: &str = "/health";

/// Router sending every method on `route` to the appender.
pub fn router(appender: MessageAppender, route: &str) -> Result<Router> {
    if !is_plain_path(route) || route == HEALTH_ROUTE {
        return Err(GuestlogError::Input(format!(
            "Invalid route '{route}': must be a literal path starting with '/' and differ from {HEALTH_ROUTE}"
        )));
    }
    Ok(Router::new()
        .route(HEALTH_ROUTE, get(|| async { "ok" }))
        .route(route, any(invoke))
        .layer(TraceLayer::new_for_http())
        .with_state(appender))
}

/// A literal path: no captures, wildcards or other characters the router
/// would interpret or reject.
fn is_plain_path(route: &str) -> bool {
    route.starts_with('/')
        && !route.contains("//")
        && route
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~'))
}

async fn invoke(State(appender): State<MessageAppender>, method: Method, body: Bytes) -> Response {
    // Empty or non-UTF-8 bodies reach the handler as absent and fail JSON parsing there.
    let body = String::from_utf8(body.to_vec()).ok().filter(|b| !b.is_empty());
    let response = appender
        .handle(FunctionRequest::new(method.as_str(), body))
        .await;
    into_http(response)
}

fn into_http(response: FunctionResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = if status == StatusCode::OK {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };
    (status, [(header::CONTENT_TYPE, content_type)], response.body).into_response()
}

pub async fn serve(appender: MessageAppender, bind: SocketAddr, route: &str) -> Result<()> {
    let app = router(appender, route)?;
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, route, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
