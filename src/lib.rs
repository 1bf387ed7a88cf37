#![doc = "The `tasknest` library crate."]
#![doc = ""]
#![doc = "A token-authenticated task API: bcrypt-hashed credentials, HS256 bearer tokens,"]
#![doc = "an authentication gate in front of `/tasks`, and per-user task storage in which"]
#![doc = "every query is scoped to the caller. The server binary (`main.rs`) wires these"]
#![doc = "pieces to a Postgres pool; the test suite wires them to the in-memory store."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
