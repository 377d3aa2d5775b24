//! Calculation errors
//!
//! Every failure is a distinguishable kind the caller can turn into
//! specific guidance. Nothing here is fatal: all kinds are recovered by
//! adjusting the input.

use shared::error::{AppError, ErrorCode};
use shared::models::ProductAttribute;
use thiserror::Error;

/// Calculation error kinds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A dimension or the weight is zero, negative or not a number
    #[error("{field} must be a positive number, got {value}")]
    InvalidDimensions { field: &'static str, value: f64 },

    /// The selected line refuses one or more declared attributes
    #[error(
        "shipping line '{line_id}' does not accept: {}",
        attribute_names(.conflicts)
    )]
    IncompatibleShippingLine {
        line_id: String,
        conflicts: Vec<ProductAttribute>,
    },

    /// Chargeable weight above the route's hard ceiling
    #[error(
        "chargeable weight {chargeable_weight}{unit} exceeds the {max_weight}{unit} limit of '{route_id}'"
    )]
    RouteWeightExceeded {
        route_id: String,
        chargeable_weight: f64,
        max_weight: f64,
        unit: &'static str,
    },

    #[error("shipping route '{0}' not found")]
    UnknownRoute(String),

    #[error("shipping line '{0}' not found")]
    UnknownShippingLine(String),

    #[error("VIP level must be between 0 and 5, got {0}")]
    InvalidVipLevel(u8),

    /// Monetary amount negative or not a number
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Exchange rate zero, negative or not a number
    #[error("{field} must be a positive exchange rate, got {value}")]
    InvalidExchangeRate { field: &'static str, value: f64 },

    /// Service fee rate outside [0, 1]
    #[error("service fee rate must be between 0 and 1, got {0}")]
    InvalidServiceFee(f64),

    /// Input beyond what the engines price
    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    /// A computed figure grew past the largest amount the engines carry
    #[error("{0} is too large to price")]
    AmountOverflow(&'static str),

    #[error("cannot read '{0}' as a BRL amount")]
    InvalidMoneyFormat(String),

    #[error("rate table invalid: {0}")]
    InvalidRateTable(String),
}

/// Result type for calculations
pub type CalcResult<T> = Result<T, CalcError>;

fn attribute_names(conflicts: &[ProductAttribute]) -> String {
    conflicts
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CalcError {
    /// Error code this kind is reported with
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidDimensions { .. } => ErrorCode::InvalidDimensions,
            Self::IncompatibleShippingLine { .. } => ErrorCode::IncompatibleShippingLine,
            Self::RouteWeightExceeded { .. } => ErrorCode::RouteWeightExceeded,
            Self::UnknownRoute(_) => ErrorCode::RouteNotFound,
            Self::UnknownShippingLine(_) => ErrorCode::ShippingLineNotFound,
            Self::InvalidVipLevel(_) => ErrorCode::InvalidVipLevel,
            Self::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            Self::InvalidExchangeRate { .. } => ErrorCode::InvalidExchangeRate,
            Self::InvalidServiceFee(_) => ErrorCode::InvalidServiceFee,
            Self::OutOfRange { .. } | Self::AmountOverflow(_) => ErrorCode::ValueOutOfRange,
            Self::InvalidMoneyFormat(_) => ErrorCode::InvalidFormat,
            Self::InvalidRateTable(_) => ErrorCode::RateTableInvalid,
        }
    }
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        let base = AppError::with_message(err.code(), err.to_string());
        match err {
            CalcError::InvalidDimensions { field, value }
            | CalcError::InvalidAmount { field, value }
            | CalcError::InvalidExchangeRate { field, value } => base
                .with_detail("field", field)
                .with_detail("value", value),
            CalcError::IncompatibleShippingLine { line_id, conflicts } => {
                let conflicts: Vec<serde_json::Value> = conflicts
                    .into_iter()
                    .map(|a| serde_json::json!({ "id": a.id, "name": a.name }))
                    .collect();
                base.with_detail("lineId", line_id)
                    .with_detail("conflicts", conflicts)
            }
            CalcError::RouteWeightExceeded {
                route_id,
                chargeable_weight,
                max_weight,
                unit,
            } => base
                .with_detail("routeId", route_id)
                .with_detail("chargeableWeight", chargeable_weight)
                .with_detail("maxWeight", max_weight)
                .with_detail("unit", unit),
            CalcError::UnknownRoute(id) => base.with_detail("routeId", id),
            CalcError::UnknownShippingLine(id) => base.with_detail("lineId", id),
            CalcError::InvalidVipLevel(level) => base.with_detail("vipLevel", level),
            CalcError::InvalidServiceFee(rate) => base.with_detail("serviceFeeRate", rate),
            CalcError::OutOfRange { field, value, max } => base
                .with_detail("field", field)
                .with_detail("value", value)
                .with_detail("max", max),
            CalcError::AmountOverflow(field) => base.with_detail("field", field),
            CalcError::InvalidMoneyFormat(_) | CalcError::InvalidRateTable(_) => base,
        }
    }
}
