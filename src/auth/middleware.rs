use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{Claims, TokenIssuer, VerificationError};
use crate::error::AppError;

/// Why the gate turned a request away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoToken,
    Malformed,
    InvalidToken(VerificationError),
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::NoToken => "No token provided",
            Rejection::Malformed => "Malformed token",
            // Every verification failure reads the same to the client.
            Rejection::InvalidToken(_) => "Invalid token",
        }
    }
}

/// Extracts and verifies the bearer token from an `Authorization` header value.
pub fn authenticate(header: Option<&str>, tokens: &TokenIssuer) -> Result<Claims, Rejection> {
    let header = header.ok_or(Rejection::NoToken)?;

    let mut segments = header.split_whitespace();
    let scheme = segments.next();
    let token = segments.next();

    match (scheme, token) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            tokens.verify(token).map_err(Rejection::InvalidToken)
        }
        _ => Err(Rejection::Malformed),
    }
}

/// Rejects requests without a valid bearer token and stores the verified
/// [`Claims`] in the request extensions for downstream extractors.
pub struct AuthMiddleware {
    tokens: Arc<TokenIssuer>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenIssuer>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default());

        match authenticate(header, &self.tokens) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(rejection) => {
                log::debug!(
                    "rejected {} {}: {:?}",
                    req.method(),
                    req.path(),
                    rejection
                );
                let response = AppError::Unauthorized(rejection.message().to_string())
                    .error_response()
                    .map_into_right_body();
                let (request, _payload) = req.into_parts();
                Box::pin(async move { Ok(ServiceResponse::new(request, response)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("middleware_test_secret")
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(authenticate(None, &issuer()), Err(Rejection::NoToken));
    }

    #[test]
    fn test_header_without_token() {
        let tokens = issuer();
        assert_eq!(authenticate(Some("Bearer"), &tokens), Err(Rejection::Malformed));
        assert_eq!(authenticate(Some(""), &tokens), Err(Rejection::Malformed));
    }

    #[test]
    fn test_wrong_scheme() {
        let tokens = issuer();
        let token = tokens.issue(1).unwrap();
        let header = format!("Basic {}", token);
        assert_eq!(authenticate(Some(&header), &tokens), Err(Rejection::Malformed));
    }

    #[test]
    fn test_invalid_token_kinds_share_a_message() {
        let tokens = issuer();
        let foreign = TokenIssuer::new("other").issue(1).unwrap();

        let garbage = authenticate(Some("Bearer garbage"), &tokens).unwrap_err();
        let bad_sig = authenticate(Some(&format!("Bearer {}", foreign)), &tokens).unwrap_err();

        assert_eq!(garbage, Rejection::InvalidToken(VerificationError::Malformed));
        assert_eq!(bad_sig, Rejection::InvalidToken(VerificationError::BadSignature));
        assert_eq!(garbage.message(), bad_sig.message());
    }

    #[test]
    fn test_valid_token() {
        let tokens = issuer();
        let token = tokens.issue(42).unwrap();

        let claims = authenticate(Some(&format!("Bearer {}", token)), &tokens).unwrap();
        assert_eq!(claims.user_id, 42);

        let claims = authenticate(Some(&format!("bearer   {}", token)), &tokens).unwrap();
        assert_eq!(claims.user_id, 42);
    }
}
