use axum::{extract::FromRequestParts, http::HeaderName};
use uuid::Uuid;

use crate::error::AppError;

pub const ACTOR_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// The staff user performing a change, recorded on every status event.
/// Authentication happens upstream; this only reads the forwarded id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(&ACTOR_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-user-id header".into()))?;

        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-user-id header".into()))?;

        let user_id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::BadRequest("x-user-id must be a UUID".into()))?;

        Ok(Actor { user_id })
    }
}
