//! Deterministic arithmetic over a list of services and a tax rate.
//!
//! All three functions are pure and cannot fail on well-typed input. An
//! empty services list yields a subtotal, tax, and total of zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bidlock_core::ServiceItem;
//! use bidlock_core::pricing;
//!
//! let services = vec![
//!     ServiceItem::new("Roof Inspection", dec!(150)),
//!     ServiceItem::new("Gutter Cleaning", dec!(300)),
//! ];
//!
//! let subtotal = pricing::subtotal(&services);
//! let tax = pricing::tax(subtotal, dec!(8));
//! assert_eq!(subtotal, dec!(450));
//! assert_eq!(tax, dec!(36));
//! assert_eq!(pricing::total(subtotal, tax), dec!(486));
//! ```

use rust_decimal::Decimal;

use crate::models::ServiceItem;

/// Sum of all line-item prices, in list order.
///
/// Negative prices are clamped to zero before summing. The original intake
/// path coerced unparseable custom-service prices to zero, so a negative
/// value here means a caller skipped validation; clamping keeps the sum
/// non-negative either way.
pub fn subtotal(services: &[ServiceItem]) -> Decimal {
    services
        .iter()
        .map(|s| s.price.max(Decimal::ZERO))
        .sum()
}

/// Tax owed on a subtotal, where `tax_rate` is a percentage (8 means 8%).
pub fn tax(subtotal: Decimal, tax_rate: Decimal) -> Decimal {
    subtotal * tax_rate / Decimal::ONE_HUNDRED
}

/// Grand total: subtotal plus tax.
pub fn total(subtotal: Decimal, tax: Decimal) -> Decimal {
    subtotal + tax
}
