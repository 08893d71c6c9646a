//! OUCH Core Domain
//!
//! Pure domain values for the OUCH order-entry protocol.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::OrderSide;
pub use values::{
    ALPHA_PAD, ORDER_TOKEN_WIDTH, PRICE_DECIMALS, PRICE_SCALE, PriceError, STOCK_WIDTH, ScaledPrice,
    Shares,
};
