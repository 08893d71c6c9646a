//! Message dispatcher
//!
//! Decodes inbound type-prefixed frames and forwards each validated
//! message to the handler supplied by the surrounding system. Malformed
//! frames are reported to the caller; what to do about them (skip, end
//! the session, ask for a resend) is the caller's decision.

use crate::codec::Decoder;
use crate::error::{CodecError, GatewayError};
use crate::messages::order::{ClientMessage, MessageType};
use crate::transport::Publisher;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Counters since the dispatcher was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub rejected: u64,
}

/// Decoder in front of a downstream [`Publisher`]
pub struct MessageDispatcher {
    decoder: Decoder,
    /// Downstream handler for validated messages
    handler: Box<dyn Publisher<ClientMessage>>,
    dispatched: AtomicU64,
    rejected: AtomicU64,
}

impl MessageDispatcher {
    pub fn new(decoder: Decoder, handler: Box<dyn Publisher<ClientMessage>>) -> Self {
        Self {
            decoder,
            handler,
            dispatched: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// Decode one frame and publish it
    pub async fn dispatch(&self, frame: &[u8]) -> Result<MessageType, GatewayError> {
        let msg = self
            .decoder
            .decode_tagged(frame)
            .inspect_err(|_| self.record_rejection())?;

        self.publish(msg).await
    }

    /// Dispatch every complete frame in `buf`
    ///
    /// Returns the number of bytes consumed. A partial frame at the end is
    /// left for the caller to resubmit with more bytes. A malformed frame
    /// stops the walk with [`GatewayError::MalformedStream`], whose
    /// `consumed` counts the frames already published ahead of it.
    pub async fn dispatch_stream(&self, buf: &[u8]) -> Result<usize, GatewayError> {
        let mut remaining = buf;

        while !remaining.is_empty() {
            match self.decoder.decode_tagged_stream(remaining) {
                Ok((msg, rest)) => {
                    self.publish(msg).await?;
                    remaining = rest;
                }
                Err(CodecError::TruncatedMessage { expected, actual }) => {
                    debug!("Partial frame: have {} of {} bytes", actual, expected);
                    break;
                }
                Err(source) => {
                    self.record_rejection();
                    return Err(GatewayError::MalformedStream {
                        consumed: buf.len() - remaining.len(),
                        source,
                    });
                }
            }
        }

        Ok(buf.len() - remaining.len())
    }

    /// Dispatch frames until the inbound channel closes
    ///
    /// Malformed frames are logged and skipped; a closed handler stops
    /// the loop with an error.
    pub async fn run(
        &self,
        mut frames: mpsc::Receiver<Vec<u8>>,
    ) -> Result<DispatchStats, GatewayError> {
        info!("MessageDispatcher started");

        while let Some(frame) = frames.recv().await {
            match self.dispatch(&frame).await {
                Ok(_) => {}
                Err(GatewayError::Codec(e)) => {
                    warn!("Dropping malformed frame ({} bytes): {}", frame.len(), e);
                }
                Err(e) => {
                    error!("Handler unavailable: {}", e);
                    return Err(e);
                }
            }
        }

        let stats = self.stats();
        info!(
            "MessageDispatcher stopped: {} dispatched, {} rejected",
            stats.dispatched, stats.rejected
        );
        Ok(stats)
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    async fn publish(&self, msg: ClientMessage) -> Result<MessageType, GatewayError> {
        let msg_type = msg.message_type();
        self.handler.publish(&msg).await?;
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        debug!("Dispatched {}", msg_type.as_str());
        Ok(msg_type)
    }

    fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }
}
