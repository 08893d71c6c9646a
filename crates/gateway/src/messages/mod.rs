//! Order-entry message types
//!
//! Plain values: built by the sender right before encoding, or by the
//! decoder right after parsing. Wire layout lives in [`crate::codec`].

pub mod order;

pub use order::{
    CancelOrderMessage, ClientMessage, EnterOrderMessage, MessageType, ModifyOrderMessage,
    ReplaceOrderMessage, TradeNowMessage,
};
