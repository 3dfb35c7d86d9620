//! HTTP API module for the Legislative Impact Engine.
//!
//! This module exposes legislation analysis, risk assessment and
//! regulatory monitoring over a REST API, plus a liveness endpoint.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnalysisRequest, EmployeeRequest, ScanRequest};
pub use response::ApiError;
pub use state::AppState;
