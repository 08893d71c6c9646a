//! OUCH Gateway
//!
//! Order-entry side of an OUCH-style venue connection. Provides:
//! - A fixed-width binary codec driven by static message schemas
//! - Typed order-entry messages (enter, cancel, modify, replace, trade now)
//! - A dispatcher that hands decoded messages to a downstream publisher
//!
//! ## Architecture
//!
//! ```text
//! Application                        Transport (TCP, etc.)
//!      │ EnterOrderMessage                 │ bytes
//! ┌────▼────┐                         ┌────▼────┐
//! │ Encoder │── 17-byte record ─────▶ │ Decoder │
//! └─────────┘                         └────┬────┘
//!                                          │ ClientMessage
//!                                    ┌─────▼──────┐
//!                                    │ Dispatcher │──▶ Publisher
//!                                    └────────────┘
//! ```
//!
//! ## Wire format
//!
//! Big-endian integers, space-padded ASCII, prices scaled by 10_000.
//! Framing, sessions and retransmission belong to the transport.

pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod transport;

// Re-export commonly used types
pub use codec::{Decoder, ENTER_ORDER, ENTER_ORDER_LEN, Encoder, MessageSchema, WireMessage};
pub use config::CodecConfig;
pub use dispatcher::{DispatchStats, MessageDispatcher};
pub use error::{CodecError, ConfigError, GatewayError, TransportError};
pub use messages::{
    CancelOrderMessage, ClientMessage, EnterOrderMessage, MessageType, ModifyOrderMessage,
    ReplaceOrderMessage, TradeNowMessage,
};
pub use ouch_core::{OrderSide, ScaledPrice};
pub use transport::{
    Publisher, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
};
