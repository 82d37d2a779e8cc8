//! The route provider seam.

use std::future::Future;
use std::sync::Arc;

use crate::domain::{RouteRequest, RouteResult};

use super::error::RouteError;

/// Something that can compute a thermal route for a request.
///
/// The engine only ever talks to the routing service through this trait, so
/// tests can substitute scripted providers and callers can layer caching.
/// Implementations report remote-side problems as `RouteError` values and
/// never panic on them.
pub trait RouteProvider: Send + Sync {
    fn fetch(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RouteResult, RouteError>> + Send;
}

impl<P: RouteProvider> RouteProvider for Arc<P> {
    fn fetch(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RouteResult, RouteError>> + Send {
        (**self).fetch(request)
    }
}
