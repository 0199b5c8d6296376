//! Error handling for the pricing engine

use rust_decimal::Decimal;

/// Pricing calculation error type.
///
/// Shape validation happens at the API boundary before input reaches the
/// engine; these variants cover the values that would poison the arithmetic
/// if they slipped through (division by zero, exploding margins).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("area must be positive, got {0}")]
    NonPositiveArea(Decimal),

    #[error("margin fraction must be below 1 in margin mode, got {0}")]
    MarginTooHigh(Decimal),

    #[error("margin/markup fraction must not be negative, got {0}")]
    NegativeRate(Decimal),

    #[error("package size for '{name}' must be positive, got {size}")]
    NonPositivePackageSize { name: String, size: Decimal },

    #[error("waste percent for '{name}' must be in [0, 1), got {waste}")]
    WasteOutOfRange { name: String, waste: Decimal },
}

pub type Result<T> = std::result::Result<T, PricingError>;
