//! Admin credential extractor.
//!
//! Reads the `X-Admin-Token` header into an [`AdminCredential`]. The extractor
//! never rejects: a missing header becomes an empty credential, which the
//! authorizer refuses with a uniform 403.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::ports::AdminCredential;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Credential presented with an admin request.
#[derive(Debug, Clone)]
pub struct AdminToken(pub AdminCredential);

#[async_trait]
impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();
        Ok(AdminToken(AdminCredential::new(token)))
    }
}
