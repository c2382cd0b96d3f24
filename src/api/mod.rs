//! HTTP API module for the Shift Pay Engine.
//!
//! This module exposes the pure calculations as JSON endpoints: shift
//! income, deductions, weekly recalculation and monthly estimation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DeductionRequest, MonthEstimateRequest, ShiftIncomeRequest, WeekRecalculationRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, HealthResponse, MonthEstimateResponse, WeekRecalculationResponse,
};
pub use state::AppState;
