//! Transport abstraction layer
//!
//! The dispatcher hands decoded messages to a [`Publisher`]; whatever sits
//! behind it (matching, persistence, acknowledgement) is outside the codec.
//! Tokio channels are provided for in-process wiring and tests.

pub mod channel;

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Publisher - sends messages downstream
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Publish a message
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;
}

/// Subscriber - receives published messages
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next message
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Try to receive without blocking (returns None if no message available)
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}
