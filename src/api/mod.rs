//! HTTP API module for the PPh 21 engine.
//!
//! This module provides the REST endpoints for PPh 21 calculations, flat-rate
//! taxes and inspection of the loaded rate tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BonusRequest, CalculationRequest, FlatTaxRequest, MAX_AMOUNT, SchemeName};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
