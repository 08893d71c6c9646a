//! Integration test: Transport bytes -> Dispatcher -> Handler
//!
//! The handler is supplied by the test, the way a matching engine or order
//! store would plug in.

use async_trait::async_trait;
use ouch_gateway::{
    CancelOrderMessage, ChannelPublisher, ClientMessage, CodecError, Decoder, DispatchStats,
    Encoder, EnterOrderMessage, GatewayError, MessageDispatcher, Publisher, TransportError,
};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Handler that records everything it receives
#[derive(Clone, Default)]
struct RecordingHandler {
    received: Arc<Mutex<Vec<ClientMessage>>>,
}

#[async_trait]
impl Publisher<ClientMessage> for RecordingHandler {
    async fn publish(&self, msg: &ClientMessage) -> Result<(), TransportError> {
        self.received.lock().await.push(msg.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_run_skips_malformed_frames() {
    let _ = env_logger::try_init();

    let handler = RecordingHandler::default();
    let dispatcher = MessageDispatcher::new(Decoder::default(), Box::new(handler.clone()));
    let encoder = Encoder::default();

    let enter = ClientMessage::from(EnterOrderMessage::buy("AAPL", 100, dec!(150.25)));
    let cancel = ClientMessage::from(CancelOrderMessage::cancel_all("ORD1"));

    let (tx, rx) = mpsc::channel(16);
    tx.send(encoder.encode_tagged(&enter).unwrap()).await.unwrap();
    tx.send(b"garbage".to_vec()).await.unwrap();
    tx.send(Vec::new()).await.unwrap();
    tx.send(encoder.encode_tagged(&cancel).unwrap()).await.unwrap();
    drop(tx);

    let stats = dispatcher.run(rx).await.unwrap();

    assert_eq!(
        stats,
        DispatchStats {
            dispatched: 2,
            rejected: 2
        }
    );
    assert_eq!(*handler.received.lock().await, vec![enter, cancel]);
}

#[tokio::test]
async fn test_run_stops_when_handler_closes() {
    let (publisher, subscriber) = ChannelPublisher::<ClientMessage>::pair(16);
    drop(subscriber);

    let dispatcher = MessageDispatcher::new(Decoder::default(), Box::new(publisher));
    let frame = Encoder::default()
        .encode_tagged(&EnterOrderMessage::sell("IBM", 1, dec!(1)).into())
        .unwrap();

    let (tx, rx) = mpsc::channel(4);
    tx.send(frame).await.unwrap();

    let result = dispatcher.run(rx).await;

    assert!(matches!(
        result,
        Err(GatewayError::Transport(TransportError::ChannelClosed))
    ));
}

#[tokio::test]
async fn test_stream_fed_in_chunks() {
    let handler = RecordingHandler::default();
    let dispatcher = MessageDispatcher::new(Decoder::default(), Box::new(handler.clone()));
    let encoder = Encoder::default();

    let orders: Vec<ClientMessage> = (1..=3)
        .map(|i| EnterOrderMessage::buy("AAPL", i, dec!(100)).into())
        .collect();

    let mut wire = Vec::new();
    for order in &orders {
        wire.extend_from_slice(&encoder.encode_tagged(order).unwrap());
    }

    // Deliver in uneven chunks, carrying unconsumed bytes forward
    let mut pending = Vec::new();
    for chunk in wire.chunks(7) {
        pending.extend_from_slice(chunk);
        let consumed = dispatcher.dispatch_stream(&pending).await.unwrap();
        pending.drain(..consumed);
    }

    assert!(pending.is_empty());
    assert_eq!(*handler.received.lock().await, orders);
    assert_eq!(dispatcher.stats().dispatched, 3);
}

#[tokio::test]
async fn test_stream_resumes_after_malformed_frame() {
    let handler = RecordingHandler::default();
    let dispatcher = MessageDispatcher::new(Decoder::default(), Box::new(handler.clone()));
    let encoder = Encoder::default();

    let enter = ClientMessage::from(EnterOrderMessage::buy("AAPL", 100, dec!(150.25)));
    let cancel = ClientMessage::from(CancelOrderMessage::cancel_all("ORD1"));

    let mut wire = encoder.encode_tagged(&enter).unwrap();
    wire.push(b'Z');
    wire.extend_from_slice(&encoder.encode_tagged(&cancel).unwrap());

    let consumed = match dispatcher.dispatch_stream(&wire).await {
        Err(GatewayError::MalformedStream {
            consumed,
            source: CodecError::UnknownMessageType(b'Z'),
        }) => consumed,
        other => panic!("expected malformed stream, got {other:?}"),
    };
    assert_eq!(consumed, 18);
    assert_eq!(*handler.received.lock().await, vec![enter.clone()]);

    // Resubmitting from the reported offset publishes nothing twice
    let again = dispatcher.dispatch_stream(&wire[consumed..]).await;
    assert!(matches!(
        again,
        Err(GatewayError::MalformedStream { consumed: 0, .. })
    ));
    assert_eq!(handler.received.lock().await.len(), 1);

    // Skipping the bad byte picks the stream back up
    let resumed = dispatcher.dispatch_stream(&wire[consumed + 1..]).await.unwrap();
    assert_eq!(resumed, 19);
    assert_eq!(*handler.received.lock().await, vec![enter, cancel]);
    assert_eq!(
        dispatcher.stats(),
        DispatchStats {
            dispatched: 2,
            rejected: 2
        }
    );
}
