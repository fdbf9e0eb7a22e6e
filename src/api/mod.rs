//! HTTP API module for the Payslip Engine.
//!
//! This module provides the REST API endpoints for generating payslips
//! and looking up PAYE.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayeRequest, PayslipRequest};
pub use response::{ApiError, FieldError, PayeResponse};
pub use state::AppState;
