//! Pricing computations for proposals.
//!
//! Subtotal, tax, and total are always derived on demand from the current
//! services and tax rate; they are never cached, so displayed amounts can
//! never drift from the line items that produced them.

pub mod common;
mod engine;

pub use common::round_half_up;
pub use engine::{subtotal, tax, total};
