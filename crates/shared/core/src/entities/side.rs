use serde::{Deserialize, Serialize};

/// Buy/sell indicator
///
/// The wire tag is bound explicitly per variant; the declaration order
/// of the variants carries no meaning on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Wire tag for [`OrderSide::Buy`] (`'B'`)
    pub const BUY_TAG: u8 = b'B';
    /// Wire tag for [`OrderSide::Sell`] (`'S'`)
    pub const SELL_TAG: u8 = b'S';

    /// Single-byte indicator sent on the wire
    #[inline(always)]
    pub const fn indicator(self) -> u8 {
        match self {
            Self::Buy => Self::BUY_TAG,
            Self::Sell => Self::SELL_TAG,
        }
    }

    /// Map a wire indicator back to a side; any other byte is `None`
    #[inline(always)]
    pub const fn from_indicator(byte: u8) -> Option<Self> {
        match byte {
            Self::BUY_TAG => Some(Self::Buy),
            Self::SELL_TAG => Some(Self::Sell),
            _ => None,
        }
    }
}
