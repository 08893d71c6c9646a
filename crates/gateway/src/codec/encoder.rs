//! Message encoder
//!
//! Walks the message's schema in wire order and writes each field into
//! its slot. The first invalid field aborts the encode, so the reported
//! error is always the earliest one in wire order.

use crate::codec::field::write_field;
use crate::codec::schema::ENTER_ORDER_LEN;
use crate::codec::wire::WireMessage;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::messages::order::{ClientMessage, EnterOrderMessage};
use log::debug;

/// Stateless encoder; safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode into a caller-owned buffer
    ///
    /// Returns the number of bytes written. On error the buffer contents
    /// are unspecified.
    pub fn encode_into<M: WireMessage>(&self, msg: &M, out: &mut [u8]) -> Result<usize, CodecError> {
        let len = M::SCHEMA.len();
        let available = out.len();
        let Some(record) = out.get_mut(..len) else {
            return Err(CodecError::BufferTooSmall {
                needed: len,
                available,
            });
        };

        for (spec, range) in M::SCHEMA.layout() {
            let value = msg
                .field(spec.id)
                .ok_or(CodecError::SchemaMismatch(spec.id.name()))?;
            write_field(spec, &value, &mut record[range], &self.config).inspect_err(|e| {
                debug!("{} rejected at {}: {}", M::SCHEMA.name, spec.id.name(), e)
            })?;
        }

        Ok(len)
    }

    /// Encode any schema-backed message to a new buffer
    pub fn encode<M: WireMessage>(&self, msg: &M) -> Result<Vec<u8>, CodecError> {
        let mut out = vec![0u8; M::SCHEMA.len()];
        self.encode_into(msg, &mut out)?;
        Ok(out)
    }

    /// Encode an Enter Order into its fixed 17-byte form
    pub fn encode_enter_order(
        &self,
        msg: &EnterOrderMessage,
    ) -> Result<[u8; ENTER_ORDER_LEN], CodecError> {
        let mut out = [0u8; ENTER_ORDER_LEN];
        self.encode_into(msg, &mut out)?;
        Ok(out)
    }

    /// Encode with a leading message type byte
    pub fn encode_tagged(&self, msg: &ClientMessage) -> Result<Vec<u8>, CodecError> {
        let msg_type = msg.message_type();
        let mut out = vec![0u8; msg_type.frame_len()];
        out[0] = msg_type.tag();

        let body = &mut out[1..];
        match msg {
            ClientMessage::EnterOrder(m) => self.encode_into(m, body)?,
            ClientMessage::CancelOrder(m) => self.encode_into(m, body)?,
            ClientMessage::ModifyOrder(m) => self.encode_into(m, body)?,
            ClientMessage::ReplaceOrder(m) => self.encode_into(m, body)?,
            ClientMessage::TradeNow(m) => self.encode_into(m, body)?,
        };

        Ok(out)
    }
}
