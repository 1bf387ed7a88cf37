use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The caller's user id, taken from the claims that `AuthMiddleware` verified.
///
/// Handlers get the owner of every task operation from here and nowhere else.
/// If the claims are missing (the route is not behind the middleware) the
/// request is rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims.user_id))),
            None => {
                log::error!("no verified claims on {}; is AuthMiddleware applied?", req.path());
                ready(Err(AppError::Unauthorized("No token provided".to_string()).into()))
            }
        }
    }
}
