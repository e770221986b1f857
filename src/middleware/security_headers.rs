//! Security-related response headers for browser clients.
//!
//! Every response leaving the gateway carries the same six headers, whatever
//! the route, method or status code. The values are fixed at compile time.
//!
//! Responsibility:
//! - Content Security Policy (the AngularJS frontend needs `unsafe-inline`
//!   and `unsafe-eval` for scripts)
//! - MIME sniffing protection
//! - Legacy browser XSS filter
//! - Clickjacking protection
//! - Referrer leakage control
//! - Browser feature restrictions
//!
//! Headers are added, never set: if a handler or an inner layer already
//! produced one of these names, both values end up on the response, with the
//! table value first (as if it had been written before the handler ran).

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Router;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{Request, Response};
use tower::{Layer, Service};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' 'unsafe-inline' 'unsafe-eval'; \
     style-src 'self' 'unsafe-inline'; \
     img-src 'self' data:; \
     font-src 'self' data:; \
     frame-ancestors 'self'; \
     form-action 'self'";
const X_CONTENT_TYPE_OPTIONS: &str = "nosniff";
const X_XSS_PROTECTION: &str = "1; mode=block";
const X_FRAME_OPTIONS: &str = "SAMEORIGIN";
const REFERRER_POLICY: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY: &str = "geolocation=(), microphone=(), camera=()";

/// The fixed header table, in the order the headers are written.
pub static SECURITY_HEADERS: [(HeaderName, HeaderValue); 6] = [
    (
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    ),
    (
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static(X_CONTENT_TYPE_OPTIONS),
    ),
    (
        header::X_XSS_PROTECTION,
        HeaderValue::from_static(X_XSS_PROTECTION),
    ),
    (
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static(X_FRAME_OPTIONS),
    ),
    (
        header::REFERRER_POLICY,
        HeaderValue::from_static(REFERRER_POLICY),
    ),
    (
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(PERMISSIONS_POLICY),
    ),
];

/// Apply the security headers to all responses produced by `router`.
///
/// Call this after every other layer so that responses generated by
/// middleware (CORS preflight, timeouts) are covered as well.
pub fn apply(router: Router) -> Router {
    router.layer(SecurityHeadersLayer)
}

/// Add every entry of [`SECURITY_HEADERS`] to `headers`.
///
/// Table entries go in front; every value already present is kept, after
/// them and in its original order.
pub fn add_security_headers(headers: &mut HeaderMap) {
    let existing = std::mem::take(headers);
    headers.reserve(SECURITY_HEADERS.len() + existing.len());

    for (name, value) in SECURITY_HEADERS.iter() {
        headers.append(name.clone(), value.clone());
    }
    for (name, value) in existing.iter() {
        headers.append(name.clone(), value.clone());
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityHeadersLayer;

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeaders { inner }
    }
}

/// Service produced by [`SecurityHeadersLayer`].
///
/// The inner service is called exactly once per request. Its error, if any,
/// is returned untouched.
#[derive(Clone, Debug)]
pub struct SecurityHeaders<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeaders<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let future = self.inner.call(req);

        Box::pin(async move {
            let mut response = future.await?;
            add_security_headers(response.headers_mut());
            Ok(response)
        })
    }
}
