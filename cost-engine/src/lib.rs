//! Import and freight cost calculation engines
//!
//! Pure, synchronous calculators with no I/O and no shared mutable state:
//!
//! - [`import_tax`] - Brazilian import duty, ICMS and IOF on a parcel
//! - [`legacy_freight`] - kg based route tariffs with VIP service fees
//! - [`line_freight`] - gram based shipping lines with attribute
//!   restrictions, service fee tiers and capped insurance
//!
//! Static reference data lives in [`RateTables`], built once and passed
//! by reference into every calculation.
//!
//! # Example
//!
//! ```
//! use cost_engine::import_tax::calculate_import_cost;
//! use shared::models::ImportCostInput;
//!
//! let result = calculate_import_cost(&ImportCostInput {
//!     product_price_cny: 500.0,
//!     shipping_cny: 50.0,
//!     exchange_rate_cny_to_brl: 0.80,
//!     service_fee_percent: 0.0,
//!     product_value_usd: 80.0,
//!     is_remessa_conforme: false,
//! });
//! assert_eq!(result.total, 825.35);
//! ```

pub mod currency;
pub mod error;
pub mod import_tax;
pub mod legacy_freight;
pub mod line_freight;
pub mod money;
pub mod tables;
pub mod weight;

pub use error::{CalcError, CalcResult};
pub use tables::{InsurancePolicy, RateTables};
pub use weight::resolve_chargeable_weight;
