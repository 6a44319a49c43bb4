//! Request middleware.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::request::PendingRequest;
use crate::error::ApiError;

/// Async request hook.
pub type RequestHook =
    dyn Fn(PendingRequest) -> BoxFuture<'static, Result<PendingRequest, ApiError>> + Send + Sync;

/// A named request hook, run before every request in registration order.
///
/// A hook may rewrite the headers or the URL. Returning an error aborts the
/// invocation before anything is sent.
#[derive(Clone)]
pub struct Middleware {
    name: String,
    on_request: Arc<RequestHook>,
}

impl Middleware {
    /// Wraps an async request hook.
    pub fn on_request<F, Fut>(name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(PendingRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PendingRequest, ApiError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            on_request: Arc::new(move |request| hook(request).boxed()),
        }
    }

    /// Middleware name, used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) async fn apply(&self, request: PendingRequest) -> Result<PendingRequest, ApiError> {
        (self.on_request)(request).await
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
