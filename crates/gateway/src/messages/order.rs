//! Order message types

use ouch_core::{OrderSide, Shares};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Enter a new order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterOrderMessage {
    /// Buy or sell
    pub side: OrderSide,
    /// Stock symbol, at most 8 ASCII characters
    pub stock: String,
    /// Total number of shares, strictly positive
    pub shares: Shares,
    /// Limit price, 4 implied decimal places on the wire
    pub price: Decimal,
}

impl EnterOrderMessage {
    pub fn new(side: OrderSide, stock: impl Into<String>, shares: Shares, price: Decimal) -> Self {
        Self {
            side,
            stock: stock.into(),
            shares,
            price,
        }
    }

    /// Create a buy order
    pub fn buy(stock: impl Into<String>, shares: Shares, price: Decimal) -> Self {
        Self::new(OrderSide::Buy, stock, shares, price)
    }

    /// Create a sell order
    pub fn sell(stock: impl Into<String>, shares: Shares, price: Decimal) -> Self {
        Self::new(OrderSide::Sell, stock, shares, price)
    }
}

/// Reduce or cancel a resting order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderMessage {
    /// Client-assigned token of the order to cancel
    pub order_token: String,
    /// New intended size; 0 cancels the whole order
    pub shares: Shares,
}

impl CancelOrderMessage {
    pub fn new(order_token: impl Into<String>, shares: Shares) -> Self {
        Self {
            order_token: order_token.into(),
            shares,
        }
    }

    /// Cancel the full remaining quantity
    pub fn cancel_all(order_token: impl Into<String>) -> Self {
        Self::new(order_token, 0)
    }
}

/// Change the side or size of a resting order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyOrderMessage {
    /// Client-assigned token of the order to modify
    pub order_token: String,
    /// New side
    pub side: OrderSide,
    /// New intended size
    pub shares: Shares,
}

impl ModifyOrderMessage {
    pub fn new(order_token: impl Into<String>, side: OrderSide, shares: Shares) -> Self {
        Self {
            order_token: order_token.into(),
            side,
            shares,
        }
    }
}

/// Replace a resting order with a new token, size and price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceOrderMessage {
    /// Token of the order being replaced
    pub existing_order_token: String,
    /// Token the replacement order will carry
    pub replacement_order_token: String,
    /// New total size; 0 leaves nothing resting
    pub shares: Shares,
    /// New limit price
    pub price: Decimal,
}

impl ReplaceOrderMessage {
    pub fn new(
        existing_order_token: impl Into<String>,
        replacement_order_token: impl Into<String>,
        shares: Shares,
        price: Decimal,
    ) -> Self {
        Self {
            existing_order_token: existing_order_token.into(),
            replacement_order_token: replacement_order_token.into(),
            shares,
            price,
        }
    }
}

/// Ask the venue to trade a resting order immediately
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeNowMessage {
    pub order_token: String,
}

impl TradeNowMessage {
    pub fn new(order_token: impl Into<String>) -> Self {
        Self {
            order_token: order_token.into(),
        }
    }
}

/// Message type byte that prefixes a tagged frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// `'O'`
    EnterOrder,
    /// `'X'`
    CancelOrder,
    /// `'M'`
    ModifyOrder,
    /// `'U'`
    ReplaceOrder,
    /// `'N'`
    TradeNow,
}

impl MessageType {
    #[inline(always)]
    pub const fn tag(self) -> u8 {
        match self {
            Self::EnterOrder => b'O',
            Self::CancelOrder => b'X',
            Self::ModifyOrder => b'M',
            Self::ReplaceOrder => b'U',
            Self::TradeNow => b'N',
        }
    }

    #[inline(always)]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'O' => Some(Self::EnterOrder),
            b'X' => Some(Self::CancelOrder),
            b'M' => Some(Self::ModifyOrder),
            b'U' => Some(Self::ReplaceOrder),
            b'N' => Some(Self::TradeNow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnterOrder => "enter_order",
            Self::CancelOrder => "cancel_order",
            Self::ModifyOrder => "modify_order",
            Self::ReplaceOrder => "replace_order",
            Self::TradeNow => "trade_now",
        }
    }
}

/// Any client-to-venue order-entry message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    EnterOrder(EnterOrderMessage),
    CancelOrder(CancelOrderMessage),
    ModifyOrder(ModifyOrderMessage),
    ReplaceOrder(ReplaceOrderMessage),
    TradeNow(TradeNowMessage),
}

impl ClientMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::EnterOrder(_) => MessageType::EnterOrder,
            Self::CancelOrder(_) => MessageType::CancelOrder,
            Self::ModifyOrder(_) => MessageType::ModifyOrder,
            Self::ReplaceOrder(_) => MessageType::ReplaceOrder,
            Self::TradeNow(_) => MessageType::TradeNow,
        }
    }
}

impl From<EnterOrderMessage> for ClientMessage {
    fn from(msg: EnterOrderMessage) -> Self {
        Self::EnterOrder(msg)
    }
}

impl From<CancelOrderMessage> for ClientMessage {
    fn from(msg: CancelOrderMessage) -> Self {
        Self::CancelOrder(msg)
    }
}

impl From<ModifyOrderMessage> for ClientMessage {
    fn from(msg: ModifyOrderMessage) -> Self {
        Self::ModifyOrder(msg)
    }
}

impl From<ReplaceOrderMessage> for ClientMessage {
    fn from(msg: ReplaceOrderMessage) -> Self {
        Self::ReplaceOrder(msg)
    }
}

impl From<TradeNowMessage> for ClientMessage {
    fn from(msg: TradeNowMessage) -> Self {
        Self::TradeNow(msg)
    }
}
