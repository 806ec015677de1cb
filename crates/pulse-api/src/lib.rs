//! # pulse-api
//!
//! HTTP adapter: REST endpoints over the reaction and comment engines.
//! The handlers translate request shapes into service calls and wrap the
//! results in the `{status: "success" | "failure"}` envelope; all semantics
//! live in `pulse-service`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
