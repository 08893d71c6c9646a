//! Binding between message structs and their schemas

use crate::codec::field::FieldValue;
use crate::codec::schema::{
    CANCEL_ORDER, ENTER_ORDER, FieldId, MODIFY_ORDER, MessageSchema, REPLACE_ORDER, TRADE_NOW,
};
use crate::error::CodecError;
use crate::messages::order::{
    CancelOrderMessage, EnterOrderMessage, MessageType, ModifyOrderMessage, ReplaceOrderMessage,
    TradeNowMessage,
};
use ouch_core::OrderSide;
use rust_decimal::Decimal;
use std::borrow::Cow;

/// A message with a fixed wire schema
///
/// The encoder asks for field values in schema order; the decoder hands
/// back the values it read, keyed by field. Neither side depends on the
/// order of the struct's own fields.
pub trait WireMessage: Sized {
    const SCHEMA: &'static MessageSchema;
    const MESSAGE_TYPE: MessageType;

    /// Value for one schema field, `None` if the message has no such field
    fn field(&self, id: FieldId) -> Option<FieldValue<'_>>;

    /// Assemble from fields already validated by the decoder
    fn from_fields(fields: DecodedFields) -> Result<Self, CodecError>;
}

/// Field values read from one record
#[derive(Debug, Default)]
pub struct DecodedFields {
    values: Vec<(FieldId, FieldValue<'static>)>,
}

impl DecodedFields {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, id: FieldId, value: FieldValue<'static>) {
        self.values.push((id, value));
    }

    fn take(&mut self, id: FieldId) -> Result<FieldValue<'static>, CodecError> {
        let pos = self
            .values
            .iter()
            .position(|(field, _)| *field == id)
            .ok_or(CodecError::SchemaMismatch(id.name()))?;
        Ok(self.values.swap_remove(pos).1)
    }

    pub fn side(&mut self, id: FieldId) -> Result<OrderSide, CodecError> {
        match self.take(id)? {
            FieldValue::Side(side) => Ok(side),
            _ => Err(CodecError::SchemaMismatch(id.name())),
        }
    }

    pub fn alpha(&mut self, id: FieldId) -> Result<String, CodecError> {
        match self.take(id)? {
            FieldValue::Alpha(text) => Ok(text.into_owned()),
            _ => Err(CodecError::SchemaMismatch(id.name())),
        }
    }

    pub fn int(&mut self, id: FieldId) -> Result<i32, CodecError> {
        match self.take(id)? {
            FieldValue::Int(value) => Ok(value),
            _ => Err(CodecError::SchemaMismatch(id.name())),
        }
    }

    pub fn price(&mut self, id: FieldId) -> Result<Decimal, CodecError> {
        match self.take(id)? {
            FieldValue::Price(price) => Ok(price),
            _ => Err(CodecError::SchemaMismatch(id.name())),
        }
    }
}

impl MessageType {
    pub const fn schema(self) -> &'static MessageSchema {
        match self {
            Self::EnterOrder => &ENTER_ORDER,
            Self::CancelOrder => &CANCEL_ORDER,
            Self::ModifyOrder => &MODIFY_ORDER,
            Self::ReplaceOrder => &REPLACE_ORDER,
            Self::TradeNow => &TRADE_NOW,
        }
    }

    /// Tagged frame length: type byte plus body
    pub const fn frame_len(self) -> usize {
        1 + self.schema().len()
    }
}

impl WireMessage for EnterOrderMessage {
    const SCHEMA: &'static MessageSchema = &ENTER_ORDER;
    const MESSAGE_TYPE: MessageType = MessageType::EnterOrder;

    fn field(&self, id: FieldId) -> Option<FieldValue<'_>> {
        match id {
            FieldId::Side => Some(FieldValue::Side(self.side)),
            FieldId::Stock => Some(FieldValue::Alpha(Cow::Borrowed(&self.stock))),
            FieldId::Shares => Some(FieldValue::Int(self.shares)),
            FieldId::Price => Some(FieldValue::Price(self.price)),
            _ => None,
        }
    }

    fn from_fields(mut fields: DecodedFields) -> Result<Self, CodecError> {
        Ok(Self {
            side: fields.side(FieldId::Side)?,
            stock: fields.alpha(FieldId::Stock)?,
            shares: fields.int(FieldId::Shares)?,
            price: fields.price(FieldId::Price)?,
        })
    }
}

impl WireMessage for CancelOrderMessage {
    const SCHEMA: &'static MessageSchema = &CANCEL_ORDER;
    const MESSAGE_TYPE: MessageType = MessageType::CancelOrder;

    fn field(&self, id: FieldId) -> Option<FieldValue<'_>> {
        match id {
            FieldId::OrderToken => Some(FieldValue::Alpha(Cow::Borrowed(&self.order_token))),
            FieldId::Shares => Some(FieldValue::Int(self.shares)),
            _ => None,
        }
    }

    fn from_fields(mut fields: DecodedFields) -> Result<Self, CodecError> {
        Ok(Self {
            order_token: fields.alpha(FieldId::OrderToken)?,
            shares: fields.int(FieldId::Shares)?,
        })
    }
}

impl WireMessage for ModifyOrderMessage {
    const SCHEMA: &'static MessageSchema = &MODIFY_ORDER;
    const MESSAGE_TYPE: MessageType = MessageType::ModifyOrder;

    fn field(&self, id: FieldId) -> Option<FieldValue<'_>> {
        match id {
            FieldId::OrderToken => Some(FieldValue::Alpha(Cow::Borrowed(&self.order_token))),
            FieldId::Side => Some(FieldValue::Side(self.side)),
            FieldId::Shares => Some(FieldValue::Int(self.shares)),
            _ => None,
        }
    }

    fn from_fields(mut fields: DecodedFields) -> Result<Self, CodecError> {
        Ok(Self {
            order_token: fields.alpha(FieldId::OrderToken)?,
            side: fields.side(FieldId::Side)?,
            shares: fields.int(FieldId::Shares)?,
        })
    }
}

impl WireMessage for ReplaceOrderMessage {
    const SCHEMA: &'static MessageSchema = &REPLACE_ORDER;
    const MESSAGE_TYPE: MessageType = MessageType::ReplaceOrder;

    fn field(&self, id: FieldId) -> Option<FieldValue<'_>> {
        match id {
            FieldId::ExistingOrderToken => {
                Some(FieldValue::Alpha(Cow::Borrowed(&self.existing_order_token)))
            }
            FieldId::ReplacementOrderToken => {
                Some(FieldValue::Alpha(Cow::Borrowed(&self.replacement_order_token)))
            }
            FieldId::Shares => Some(FieldValue::Int(self.shares)),
            FieldId::Price => Some(FieldValue::Price(self.price)),
            _ => None,
        }
    }

    fn from_fields(mut fields: DecodedFields) -> Result<Self, CodecError> {
        Ok(Self {
            existing_order_token: fields.alpha(FieldId::ExistingOrderToken)?,
            replacement_order_token: fields.alpha(FieldId::ReplacementOrderToken)?,
            shares: fields.int(FieldId::Shares)?,
            price: fields.price(FieldId::Price)?,
        })
    }
}

impl WireMessage for TradeNowMessage {
    const SCHEMA: &'static MessageSchema = &TRADE_NOW;
    const MESSAGE_TYPE: MessageType = MessageType::TradeNow;

    fn field(&self, id: FieldId) -> Option<FieldValue<'_>> {
        match id {
            FieldId::OrderToken => Some(FieldValue::Alpha(Cow::Borrowed(&self.order_token))),
            _ => None,
        }
    }

    fn from_fields(mut fields: DecodedFields) -> Result<Self, CodecError> {
        Ok(Self {
            order_token: fields.alpha(FieldId::OrderToken)?,
        })
    }
}
