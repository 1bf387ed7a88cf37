pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::state::AppState;

/// Registers the shared state, extractor configs and every route.
///
/// `/register`, `/login` and `/health` are public; everything under `/tasks`
/// sits behind `AuthMiddleware`.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.clone()))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(state.tokens.clone()))
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected request body: {}", err);
    AppError::Validation("Invalid JSON body".into()).into()
}

// The only path parameter is a task id; one that does not parse cannot name
// any task, so it gets the ordinary not-found answer.
fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected path: {}", err);
    AppError::NotFound(tasks::TASK_NOT_FOUND.into()).into()
}
