mod price;

pub use price::{PRICE_DECIMALS, PRICE_SCALE, PriceError, ScaledPrice};

/// Share count as carried on the wire (signed 32-bit)
pub type Shares = i32;

/// Wire width of the stock symbol field
pub const STOCK_WIDTH: usize = 8;

/// Wire width of a client order token
pub const ORDER_TOKEN_WIDTH: usize = 14;

/// Pad character for alpha fields (left-justified, right-padded)
pub const ALPHA_PAD: u8 = b' ';
