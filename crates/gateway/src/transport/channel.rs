//! Tokio channel-based transport for single-process mode
//!
//! Two flavours:
//! - broadcast (`ChannelPublisher`) for fan-out of node outputs; slow
//!   subscribers skip what they missed, and with no subscriber at all the
//!   message is discarded
//! - mpsc (`QueuePublisher`) for node input, where every message must be
//!   seen exactly once and in order
//!
//! No serialization overhead - messages are passed directly.

use crate::error::TransportError;
use crate::transport::{Publisher, Subscriber};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{broadcast, mpsc};

/// Channel-based publisher using broadcast
pub struct ChannelPublisher<M> {
    tx: broadcast::Sender<M>,
}

impl<M: Clone> ChannelPublisher<M> {
    /// Create a new publisher with the given broadcast sender
    pub fn new(tx: broadcast::Sender<M>) -> Self {
        Self { tx }
    }

    /// Create a publisher/subscriber pair with given capacity
    pub fn pair(capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx }, ChannelSubscriber { rx })
    }

    /// Get another subscriber for this publisher
    pub fn subscribe(&self) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

impl<M> Clone for ChannelPublisher<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        // An output nobody listens to is not an error for the producer
        if self.tx.send(msg.clone()).is_err() {
            debug!("No subscribers, message discarded");
        }
        Ok(())
    }
}

/// Channel-based subscriber using broadcast receiver
///
/// Closes once every [`ChannelPublisher`] clone is dropped.
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<M>,
}

impl<M: Clone> ChannelSubscriber<M> {
    /// Create a new subscriber from a broadcast receiver
    pub fn new(rx: broadcast::Receiver<M>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: DeserializeOwned + Clone + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Ok(msg),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Subscriber lagged, skipped {} messages", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Lagged(_)) => {
                // Return None on lag, caller can retry
                Ok(None)
            }
            Err(broadcast::error::TryRecvError::Closed) => Err(TransportError::ChannelClosed),
        }
    }
}

/// Ordered, lossless publisher backed by a bounded mpsc queue
///
/// Publishing waits for room when the queue is full.
pub struct QueuePublisher<M> {
    tx: mpsc::Sender<M>,
}

impl<M> QueuePublisher<M> {
    /// Create a publisher/subscriber pair with given capacity
    pub fn pair(capacity: usize) -> (Self, QueueSubscriber<M>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, QueueSubscriber { rx })
    }

    /// Publish an owned message without cloning
    pub async fn send(&self, msg: M) -> Result<(), TransportError> {
        self.tx
            .send(msg)
            .await
            .map_err(|_| TransportError::ChannelClosed)
    }
}

impl<M> Clone for QueuePublisher<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[async_trait]
impl<M> Publisher<M> for QueuePublisher<M>
where
    M: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        self.send(msg.clone()).await
    }
}

/// Single consumer side of a [`QueuePublisher`]
pub struct QueueSubscriber<M> {
    rx: mpsc::Receiver<M>,
}

#[async_trait]
impl<M> Subscriber<M> for QueueSubscriber<M>
where
    M: DeserializeOwned + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        self.rx.recv().await.ok_or(TransportError::ChannelClosed)
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(TransportError::ChannelClosed),
        }
    }
}
