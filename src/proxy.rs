//! POST-only proxy forwarding dashboard queries to the upstream origin.
//!
//! The browser posts form-encoded `{dept, number}` here; the proxy replays
//! it against the upstream service and passes the JSON body and status back
//! through. Any method other than POST on the route gets a 405 from the
//! method router.

use axum::{
    Json, Router,
    extract::{Form, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

#[derive(Clone)]
struct ProxyState {
    http: reqwest::Client,
    upstream: String,
}

#[derive(Debug, Deserialize)]
struct GradeQuery {
    dept: String,
    number: String,
}

pub fn router(upstream: String) -> Router {
    let state = ProxyState {
        http: reqwest::Client::new(),
        upstream,
    };
    Router::new()
        .route("/api/grades", post(forward))
        .with_state(state)
}

async fn forward(State(state): State<ProxyState>, Form(query): Form<GradeQuery>) -> Response {
    let form = [("dept", query.dept.as_str()), ("number", query.number.as_str())];

    let upstream_response = match state.http.post(&state.upstream).form(&form).send().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "upstream request failed");
            return bad_gateway();
        }
    };

    // reqwest and axum may pin different `http` versions; go through u16.
    let status = StatusCode::from_u16(upstream_response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);

    match upstream_response.bytes().await {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_vec(),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed reading upstream body");
            bad_gateway()
        }
    }
}

fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"error": "failed to fetch data from upstream"})),
    )
        .into_response()
}

/// Binds and runs the proxy until the task is cancelled.
pub async fn serve(bind: &str, upstream: String) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, upstream = %upstream, "proxy listening");
    axum::serve(listener, router(upstream)).await?;
    Ok(())
}
