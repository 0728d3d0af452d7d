use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::access::Actor;

pub const USER_HEADER: &str = "x-user";

/// Identity as asserted by the fronting auth layer. Verifying it is that
/// layer's job; a missing header means an anonymous caller.
pub struct RequestActor(pub Actor);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestActor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        Ok(RequestActor(match user {
            Some(name) => Actor::User(name.to_string()),
            None => Actor::Anonymous,
        }))
    }
}
