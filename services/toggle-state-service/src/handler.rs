use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use toggle_common::{now_iso8601, StateChange, StateReport, StateUpdate, ToggleError};
use toggle_http::errors::ApiError;

/// Largest POST body the state route will buffer.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Single entry point for every method on the state route.
///
/// Preflight is answered before anything else and the body is only read
/// for POST. All other failures funnel through [`ApiError`] so the caller
/// only ever sees the fixed messages.
pub async fn handle_state(req: Request) -> Response {
    if *req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    match dispatch(req).await {
        Ok(resp) => resp,
        Err(err) => ApiError::from(err).into_response(),
    }
}

async fn dispatch(req: Request) -> Result<Response, ToggleError> {
    let method = req.method().clone();
    match &method {
        &Method::GET => report_state(),
        &Method::POST => {
            let body = read_body(req.into_body()).await?;
            apply_state(&body)
        }
        _ => Err(ToggleError::MethodNotAllowed),
    }
}

async fn read_body(body: Body) -> Result<Bytes, ToggleError> {
    axum::body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
        if exceeds_limit(&err) {
            ToggleError::PayloadTooLarge
        } else {
            ToggleError::body(err.to_string())
        }
    })
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

// Nothing is stored, so every read sees the default.
fn report_state() -> Result<Response, ToggleError> {
    let report = StateReport::system_default(now_iso8601()?);
    json_ok(&report)
}

fn apply_state(body: &[u8]) -> Result<Response, ToggleError> {
    let (status, timestamp) = StateUpdate::from_slice(body)?.validate()?;
    let last_updated = match timestamp {
        Some(ts) => ts,
        None => now_iso8601()?,
    };

    tracing::info!(%status, timestamp = %last_updated, "state changed");

    json_ok(&StateChange::applied(status, last_updated))
}

fn json_ok<T: Serialize>(value: &T) -> Result<Response, ToggleError> {
    let bytes = serde_json::to_vec(value)?;
    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        bytes,
    )
        .into_response())
}
