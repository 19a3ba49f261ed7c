//! The request-handling capability shared by the gate and the forwarder.

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

/// Anything that turns a request into a response.
///
/// Implementations own the request for the duration of the call and may
/// mutate it freely before passing it on.
pub trait Handler: Send + Sync {
    fn handle(&self, request: Request<Body>) -> impl Future<Output = Response> + Send;
}

impl<H: Handler> Handler for Arc<H> {
    fn handle(&self, request: Request<Body>) -> impl Future<Output = Response> + Send {
        (**self).handle(request)
    }
}
