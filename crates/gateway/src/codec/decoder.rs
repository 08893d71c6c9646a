//! Message decoder
//!
//! The record length from the schema is checked before any field is
//! read; fields are then read in wire order and the first invalid one
//! decides the error.

use crate::codec::field::read_field;
use crate::codec::wire::{DecodedFields, WireMessage};
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::messages::order::{
    CancelOrderMessage, ClientMessage, EnterOrderMessage, MessageType, ModifyOrderMessage,
    ReplaceOrderMessage, TradeNowMessage,
};
use log::debug;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Stateless decoder; safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode exactly one record; extra bytes are an error
    pub fn decode<M: WireMessage>(&self, buf: &[u8]) -> Result<M, CodecError> {
        let len = M::SCHEMA.len();
        if buf.len() > len {
            return Err(CodecError::TrailingBytes {
                expected: len,
                actual: buf.len(),
            });
        }
        self.decode_stream(buf).map(|(msg, _)| msg)
    }

    /// Decode the first record and return the unconsumed remainder
    ///
    /// For callers splitting a stream of back-to-back records.
    pub fn decode_stream<'b, M: WireMessage>(
        &self,
        buf: &'b [u8],
    ) -> Result<(M, &'b [u8]), CodecError> {
        let len = M::SCHEMA.len();
        if buf.len() < len {
            return Err(CodecError::TruncatedMessage {
                expected: len,
                actual: buf.len(),
            });
        }

        let (record, rest) = buf.split_at(len);
        Ok((self.decode_record(record)?, rest))
    }

    /// Iterate over back-to-back records of one message type
    pub fn records<'d, 'b, M: WireMessage>(&'d self, buf: &'b [u8]) -> Records<'d, 'b, M> {
        Records {
            decoder: self,
            remaining: buf,
            failed: false,
            _marker: PhantomData,
        }
    }

    /// Decode one type-prefixed frame; extra bytes are an error
    pub fn decode_tagged(&self, frame: &[u8]) -> Result<ClientMessage, CodecError> {
        let msg_type = Self::frame_type(frame)?;
        if frame.len() > msg_type.frame_len() {
            return Err(CodecError::TrailingBytes {
                expected: msg_type.frame_len(),
                actual: frame.len(),
            });
        }
        self.decode_tagged_stream(frame).map(|(msg, _)| msg)
    }

    /// Decode the first type-prefixed frame and return the remainder
    pub fn decode_tagged_stream<'b>(
        &self,
        buf: &'b [u8],
    ) -> Result<(ClientMessage, &'b [u8]), CodecError> {
        let msg_type = Self::frame_type(buf)?;
        if buf.len() < msg_type.frame_len() {
            return Err(CodecError::TruncatedMessage {
                expected: msg_type.frame_len(),
                actual: buf.len(),
            });
        }

        let body = &buf[1..];
        let (msg, rest) = match msg_type {
            MessageType::EnterOrder => {
                let (m, rest) = self.decode_stream::<EnterOrderMessage>(body)?;
                (ClientMessage::from(m), rest)
            }
            MessageType::CancelOrder => {
                let (m, rest) = self.decode_stream::<CancelOrderMessage>(body)?;
                (ClientMessage::from(m), rest)
            }
            MessageType::ModifyOrder => {
                let (m, rest) = self.decode_stream::<ModifyOrderMessage>(body)?;
                (ClientMessage::from(m), rest)
            }
            MessageType::ReplaceOrder => {
                let (m, rest) = self.decode_stream::<ReplaceOrderMessage>(body)?;
                (ClientMessage::from(m), rest)
            }
            MessageType::TradeNow => {
                let (m, rest) = self.decode_stream::<TradeNowMessage>(body)?;
                (ClientMessage::from(m), rest)
            }
        };
        Ok((msg, rest))
    }

    fn frame_type(frame: &[u8]) -> Result<MessageType, CodecError> {
        let &tag = frame.first().ok_or(CodecError::EmptyFrame)?;
        MessageType::from_tag(tag).ok_or(CodecError::UnknownMessageType(tag))
    }

    fn decode_record<M: WireMessage>(&self, record: &[u8]) -> Result<M, CodecError> {
        let mut fields = DecodedFields::with_capacity(M::SCHEMA.fields.len());

        for (spec, range) in M::SCHEMA.layout() {
            let value = read_field(spec, &record[range], &self.config).inspect_err(|e| {
                debug!("{} rejected at {}: {}", M::SCHEMA.name, spec.id.name(), e)
            })?;
            fields.push(spec.id, value);
        }

        M::from_fields(fields)
    }
}

/// Iterator over back-to-back records
///
/// Stops after the first error; [`Records::remainder`] then starts at the
/// record that failed (a short tail to resubmit once more bytes arrive).
pub struct Records<'d, 'b, M> {
    decoder: &'d Decoder,
    remaining: &'b [u8],
    failed: bool,
    _marker: PhantomData<M>,
}

impl<'d, 'b, M> Records<'d, 'b, M> {
    /// Bytes not yet consumed
    pub fn remainder(&self) -> &'b [u8] {
        self.remaining
    }
}

impl<M: WireMessage> Iterator for Records<'_, '_, M> {
    type Item = Result<M, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        match self.decoder.decode_stream(self.remaining) {
            Ok((msg, rest)) => {
                self.remaining = rest;
                Some(Ok(msg))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<M: WireMessage> FusedIterator for Records<'_, '_, M> {}
