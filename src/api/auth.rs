//! Request authentication
//!
//! [`CurrentUser`] is the only way a handler obtains an identity: it
//! pulls the bearer token from the `Authorization` header and resolves
//! it to a stored account. Handlers that take it are authenticated by
//! construction; anything wrong with the token rejects the request
//! before the handler runs.

use super::AppState;
use crate::core::User;
use crate::error::SmartTicketError;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

/// Principal resolved from the request's bearer token
pub struct CurrentUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| {
            let (scheme, token) = auth.split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("bearer")
                .then_some(token.trim())
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = SmartTicketError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers).ok_or(SmartTicketError::InvalidToken)?;
        let user = state.identity.resolve_principal(token).await?;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        // scheme is case-insensitive
        assert_eq!(bearer_token(&headers_with("bearer t")), Some("t"));
    }

    #[test]
    fn test_non_bearer_schemes_rejected() {
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
