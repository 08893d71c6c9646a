//! Error types for the gateway crate

use rust_decimal::Decimal;
use thiserror::Error;

/// Wire-level validation and framing errors
///
/// Every variant is a value returned to the caller; a malformed message
/// never leaves the encoder or decoder in a different state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid buy/sell indicator: {0:#04x}")]
    InvalidIndicator(u8),

    #[error("Stock symbol is {len} characters, max {max}")]
    SymbolTooLong { len: usize, max: usize },

    #[error("Stock symbol {0:?} is not ASCII or ends in padding")]
    InvalidSymbol(String),

    #[error("Order token is {len} characters, max {max}")]
    TokenTooLong { len: usize, max: usize },

    #[error("Order token {0:?} is not ASCII or ends in padding")]
    InvalidToken(String),

    #[error("Invalid share count {shares} (minimum {min})")]
    InvalidShares { shares: i32, min: i32 },

    #[error("Price {0} out of range")]
    PriceOutOfRange(Decimal),

    #[error("Price {0} has more than 4 decimal places")]
    PrecisionLoss(Decimal),

    #[error("Truncated message: need {expected} bytes, got {actual}")]
    TruncatedMessage { expected: usize, actual: usize },

    #[error("Trailing bytes: expected {expected} bytes, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },

    #[error("Output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Unknown message type: {0:#04x}")]
    UnknownMessageType(u8),

    #[error("Empty frame")]
    EmptyFrame,

    #[error("Field {0} does not match its schema kind")]
    SchemaMismatch(&'static str),
}

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Channel closed")]
    ChannelClosed,
}

/// Gateway-level errors (dispatch operations)
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// A frame in a stream failed after `consumed` bytes were published
    #[error("Malformed frame after {consumed} bytes: {source}")]
    MalformedStream {
        consumed: usize,
        #[source]
        source: CodecError,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
