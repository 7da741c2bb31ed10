//! HTTP API module for the Payroll Engine.
//!
//! This module exposes the payroll calculators as REST endpoints under
//! `/calculate/*`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdjustmentsRequest, EligibleDaysRequest, OvertimeRateRequest, PayrollRequest,
    SalaryBreakupRequest, WorkingDaysRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
