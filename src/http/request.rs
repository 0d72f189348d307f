//! Request identity middleware.
//!
//! # Responsibilities
//! - Assign a unique request ID (UUID v4) as early as possible
//! - Preserve IDs supplied by a fronting proxy
//! - Expose the ID to handlers for logging and upstream propagation
//!
//! # Design Decisions
//! - Plain tower layer so the ID exists before any routing decision
//! - The ID travels as the `x-request-id` header, so forwarding the headers
//!   upstream propagates it for free

use std::task::{Context, Poll};

use axum::http::{HeaderName, HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID attached to the request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Convenience accessor for the request ID header.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
    }
}

/// Layer that ensures every request carries an `x-request-id`.
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let id = match request.request_id() {
            Some(existing) => existing.to_owned(),
            None => {
                let generated = Uuid::new_v4().to_string();
                if let Ok(value) = HeaderValue::from_str(&generated) {
                    request.headers_mut().insert(X_REQUEST_ID, value);
                }
                generated
            }
        };
        request.extensions_mut().insert(RequestId(id));

        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[derive(Clone)]
    struct Capture;

    impl Service<Request<Body>> for Capture {
        type Response = Request<Body>;
        type Error = std::convert::Infallible;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: Request<Body>) -> Self::Future {
            std::future::ready(Ok(request))
        }
    }

    #[tokio::test]
    async fn generates_an_id_when_absent() {
        let mut service = RequestIdLayer.layer(Capture);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let seen = service.call(request).await.unwrap();
        let id = seen.request_id().expect("id should be set");
        assert_eq!(id.len(), 36);
        assert_eq!(seen.extensions().get::<RequestId>().unwrap().0, id);
    }

    #[tokio::test]
    async fn preserves_an_existing_id() {
        let mut service = RequestIdLayer.layer(Capture);
        let request = Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "already-set")
            .body(Body::empty())
            .unwrap();

        let seen = service.call(request).await.unwrap();
        assert_eq!(seen.request_id(), Some("already-set"));
    }
}
