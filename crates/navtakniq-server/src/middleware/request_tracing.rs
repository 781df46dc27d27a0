// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::{extract_request_trace, REQUEST_ID_HEADER};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, Instrument};

const API_PREFIX: &str = "/api";

pub(crate) async fn request_tracing_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let trace = extract_request_trace(request.headers(), &state);

    let span = tracing::info_span!(
        "http.request",
        request_id = %trace.request_id,
        method = %method,
        route = %route,
    );

    let started = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    if route.starts_with(API_PREFIX) {
        let latency_ms = started.elapsed().as_millis();
        let status = response.status().as_u16();
        span.in_scope(|| {
            info!(
                status,
                latency_ms = latency_ms as u64,
                "{method} {route} {status} in {latency_ms}ms"
            );
        });
    }
    if let Ok(value) = HeaderValue::from_str(&trace.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
