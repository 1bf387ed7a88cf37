use crate::{
    auth::{
        hash_password, spend_verification_time, verify_password, AuthResponse, LoginRequest,
        RegisterRequest, INVALID_CREDENTIALS,
    },
    error::AppError,
    models::NewUser,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a user account and returns a token for it together with the
/// public user fields.
///
/// ## Responses:
/// - `200 OK`: `{token, user: {id, name, email}}`.
/// - `400 Bad Request`: a field is missing, the email is malformed, or the email is already in use.
/// - `500 Internal Server Error`: store failure.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let registration = register_data.into_inner().into_registration()?;

    if state.users.find_by_email(&registration.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    // bcrypt is deliberately slow; keep it off the event loop.
    let cost = state.bcrypt_cost;
    let password = registration.password;
    let password_hash = web::block(move || hash_password(&password, cost)).await??;

    // A concurrent registration can still win the race; the store's unique
    // constraint reports that as EmailTaken.
    let user = state
        .users
        .create(NewUser {
            name: registration.name,
            email: registration.email,
            password_hash,
        })
        .await?;

    let token = state.tokens.issue(user.id)?;
    log::info!("registered user {}", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}

/// Login user
///
/// Unknown email and wrong password produce the same response, and both
/// pay for one bcrypt round at the configured cost.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = login_data.into_inner().into_credentials()?;

    let record = match state.users.find_by_email(&email).await? {
        Some(record) => record,
        None => {
            let cost = state.bcrypt_cost;
            web::block(move || spend_verification_time(&password, cost)).await?;
            return Err(AppError::Validation(INVALID_CREDENTIALS.into()));
        }
    };

    let stored_hash = record.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &stored_hash)).await?;
    if !matches {
        return Err(AppError::Validation(INVALID_CREDENTIALS.into()));
    }

    let token = state.tokens.issue(record.id)?;
    log::debug!("user {} logged in", record.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: record.into_public(),
    }))
}
