//! Unified error codes
//!
//! Error codes used by the calculation engines, the HTTP server and the
//! frontend. Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Shipment errors
//! - 2xxx: Route and shipping line errors
//! - 3xxx: Tariff input errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Shipment ====================
    /// A dimension or the weight is zero, negative or not a number
    InvalidDimensions = 1001,
    /// Chargeable weight is above the route's hard ceiling
    RouteWeightExceeded = 1002,

    // ==================== 2xxx: Route / Line ====================
    /// Legacy shipping route not found
    RouteNotFound = 2001,
    /// Shipping line not found
    ShippingLineNotFound = 2002,
    /// Shipping line refuses one of the declared product attributes
    IncompatibleShippingLine = 2003,
    /// Product attribute not found
    AttributeNotFound = 2004,

    // ==================== 3xxx: Tariff ====================
    /// Monetary amount is negative or not a number
    InvalidAmount = 3001,
    /// Exchange rate is zero, negative or not a number
    InvalidExchangeRate = 3002,
    /// Service fee rate outside the allowed range
    InvalidServiceFee = 3003,
    /// VIP level outside 0-5
    InvalidVipLevel = 3004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
    /// Rate table failed validation
    RateTableInvalid = 9003,
    /// Request timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Shipment
            ErrorCode::InvalidDimensions => "Dimensions and weight must be positive numbers",
            ErrorCode::RouteWeightExceeded => "Package is too heavy for the selected route",

            // Route / Line
            ErrorCode::RouteNotFound => "Shipping route not found",
            ErrorCode::ShippingLineNotFound => "Shipping line not found",
            ErrorCode::IncompatibleShippingLine => {
                "Shipping line does not accept the declared product attributes"
            }
            ErrorCode::AttributeNotFound => "Product attribute not found",

            // Tariff
            ErrorCode::InvalidAmount => "Amount must be a non-negative number",
            ErrorCode::InvalidExchangeRate => "Exchange rate must be a positive number",
            ErrorCode::InvalidServiceFee => "Service fee is out of range",
            ErrorCode::InvalidVipLevel => "VIP level must be between 0 and 5",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RateTableInvalid => "Rate table is invalid",
            ErrorCode::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Shipment
            1001 => Ok(ErrorCode::InvalidDimensions),
            1002 => Ok(ErrorCode::RouteWeightExceeded),

            // Route / Line
            2001 => Ok(ErrorCode::RouteNotFound),
            2002 => Ok(ErrorCode::ShippingLineNotFound),
            2003 => Ok(ErrorCode::IncompatibleShippingLine),
            2004 => Ok(ErrorCode::AttributeNotFound),

            // Tariff
            3001 => Ok(ErrorCode::InvalidAmount),
            3002 => Ok(ErrorCode::InvalidExchangeRate),
            3003 => Ok(ErrorCode::InvalidServiceFee),
            3004 => Ok(ErrorCode::InvalidVipLevel),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),
            9003 => Ok(ErrorCode::RateTableInvalid),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);

        assert_eq!(ErrorCode::InvalidDimensions.code(), 1001);
        assert_eq!(ErrorCode::RouteWeightExceeded.code(), 1002);

        assert_eq!(ErrorCode::RouteNotFound.code(), 2001);
        assert_eq!(ErrorCode::ShippingLineNotFound.code(), 2002);
        assert_eq!(ErrorCode::IncompatibleShippingLine.code(), 2003);

        assert_eq!(ErrorCode::InvalidAmount.code(), 3001);
        assert_eq!(ErrorCode::InvalidVipLevel.code(), 3004);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::TimeoutError.code(), 9004);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::IncompatibleShippingLine.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::InvalidDimensions));
        assert_eq!(
            ErrorCode::try_from(2003),
            Ok(ErrorCode::IncompatibleShippingLine)
        );
        assert_eq!(ErrorCode::try_from(9003), Ok(ErrorCode::RateTableInvalid));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4), Err(InvalidErrorCode(4)));
        assert_eq!(ErrorCode::try_from(1500), Err(InvalidErrorCode(1500)));
        assert_eq!(ErrorCode::try_from(u16::MAX), Err(InvalidErrorCode(u16::MAX)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::RouteWeightExceeded).unwrap();
        assert_eq!(json, "1002");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("2002").unwrap();
        assert_eq!(code, ErrorCode::ShippingLineNotFound);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("4242");
        assert!(result.is_err());
    }

    #[test]
    fn test_every_code_survives_u16() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::InvalidDimensions,
            ErrorCode::RouteWeightExceeded,
            ErrorCode::RouteNotFound,
            ErrorCode::ShippingLineNotFound,
            ErrorCode::IncompatibleShippingLine,
            ErrorCode::AttributeNotFound,
            ErrorCode::InvalidAmount,
            ErrorCode::InvalidExchangeRate,
            ErrorCode::InvalidServiceFee,
            ErrorCode::InvalidVipLevel,
            ErrorCode::InternalError,
            ErrorCode::ConfigError,
            ErrorCode::RateTableInvalid,
            ErrorCode::TimeoutError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(u16::from(code)), Ok(code));
            assert!(!code.message().is_empty());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::InvalidServiceFee), "3003");
    }
}
