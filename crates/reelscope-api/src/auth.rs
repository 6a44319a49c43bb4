//! Bearer-token auth plugin.
//!
//! The token provider is awaited before every request; nothing is cached, so
//! rotating credentials take effect on the next call.

use std::future::Future;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::client::{ApiClient, Middleware, PendingRequest};
use crate::error::ApiError;

/// Name the auth middleware is registered under.
pub const MIDDLEWARE_NAME: &str = "bearer-auth";

/// Returns a middleware that sets `Authorization: Bearer <token>`.
///
/// A failing provider, or a token that is not a valid header value, aborts
/// the invocation with [`ApiError::Credential`] before anything is sent.
pub fn bearer<F, Fut>(get_token: F) -> Middleware
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
{
    Middleware::on_request(MIDDLEWARE_NAME, move |mut request: PendingRequest| {
        let token = get_token();
        async move {
            let token = token.await.map_err(|e| ApiError::Credential(e.into()))?;
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Credential(Box::new(e)))?;
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
            tracing::trace!(alias = %request.alias, "Bearer credential attached");
            Ok(request)
        }
    })
}

/// Installs [`bearer`] on `client`.
pub fn install<F, Fut>(client: &mut ApiClient, get_token: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
{
    client.use_middleware(bearer(get_token));
}
