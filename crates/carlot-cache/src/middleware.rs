//! Conditional-response middleware.
//!
//! Runs in two phases. Phase one drives the downstream chain to completion
//! and holds its status, headers and body as plain data
//! ([`BufferedResponse`]). Phase two picks a [`Decision`] and builds the one
//! response that is sent, so status and headers are never written twice.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
        response::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use carlot_core::AppError;
use http_body_util::BodyExt;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtagError {
    #[error("failed to buffer response body: {0}")]
    Body(#[from] axum::Error),
    #[error("fingerprint is not a valid header value")]
    Header(#[from] axum::http::header::InvalidHeaderValue),
}

/// Generate a strong ETag: lower-case hex SHA-256 of `body`, in double quotes.
pub fn generate_etag(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    format!("\"{}\"", hex::encode(hash))
}

/// Outcome of comparing a buffered response with the client validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Send the buffered response unchanged.
    Passthrough,
    /// The client copy is current; send 304 with this ETag and no body.
    NotModified(String),
    /// Send the full body with this ETag attached.
    Tagged(String),
}

/// Decide how to answer a buffered GET/HEAD response.
///
/// Only an exact `200 OK` with a non-empty body is fingerprinted. The
/// comparison with `If-None-Match` is exact string equality.
pub fn decide(status: StatusCode, body: &[u8], if_none_match: Option<&str>) -> Decision {
    if status != StatusCode::OK || body.is_empty() {
        return Decision::Passthrough;
    }

    let etag = generate_etag(body);
    match if_none_match {
        Some(client) if client == etag => Decision::NotModified(etag),
        _ => Decision::Tagged(etag),
    }
}

/// A downstream response held in memory until the decision is made.
#[derive(Debug)]
pub struct BufferedResponse {
    pub parts: Parts,
    pub body: Bytes,
}

impl BufferedResponse {
    /// Drain `response` into memory. Nothing reaches the client here.
    pub async fn collect(response: Response) -> Result<Self, EtagError> {
        let (parts, body) = response.into_parts();
        let body = body.collect().await?.to_bytes();
        Ok(Self { parts, body })
    }

    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    /// Build the single outgoing response for `decision`.
    pub fn finish(self, decision: Decision) -> Result<Response, EtagError> {
        let Self { mut parts, body } = self;

        match decision {
            Decision::Passthrough => Ok(Response::from_parts(parts, Body::from(body))),
            Decision::NotModified(etag) => {
                parts.status = StatusCode::NOT_MODIFIED;
                strip_entity_headers(&mut parts.headers);
                parts.headers.insert(ETAG, HeaderValue::from_str(&etag)?);
                Ok(Response::from_parts(parts, Body::empty()))
            }
            Decision::Tagged(etag) => {
                parts.headers.insert(ETAG, HeaderValue::from_str(&etag)?);
                Ok(Response::from_parts(parts, Body::from(body)))
            }
        }
    }
}

fn strip_entity_headers(headers: &mut HeaderMap) {
    headers.remove(CONTENT_LENGTH);
    headers.remove(CONTENT_TYPE);
}

/// ETag middleware for conditional GET/HEAD requests.
///
/// Other methods pass through untouched. The whole response body is
/// buffered, which suits the small JSON payloads of this API.
pub async fn conditional_get(request: Request, next: Next) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return next.run(request).await;
    }

    let if_none_match = request
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;

    match respond(response, if_none_match.as_deref()).await {
        Ok(response) => response,
        Err(err) => AppError::internal(err).into_response(),
    }
}

async fn respond(response: Response, if_none_match: Option<&str>) -> Result<Response, EtagError> {
    let buffered = BufferedResponse::collect(response).await?;
    let decision = decide(buffered.status(), &buffered.body, if_none_match);

    if matches!(decision, Decision::NotModified(_)) {
        tracing::debug!("conditional request matched, sending 304");
    }

    buffered.finish(decision)
}
