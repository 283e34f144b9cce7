//! Pipeline - drives a filter node from an input subscriber
//!
//! Messages are taken one at a time, in arrival order, and each is fully
//! decided and persisted before the next is read. Per-message errors
//! (extraction, store) drop that message and are counted; transport errors
//! end the run.

use delta_core::Message;
use delta_gateway::{Output, Publisher, Subjects, Subscriber, TransportError};
use log::{debug, info};
use serde::Serialize;

use crate::node::{ChangeDetectNode, NodeStatus};

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub received: u64,
    pub forwarded: u64,
    pub rejected: u64,
    /// Messages that reached neither output
    pub dropped: u64,
}

pub struct Pipeline {
    node: ChangeDetectNode,
    input: Box<dyn Subscriber<Message>>,
    forward: Box<dyn Publisher<Message>>,
    rejected: Box<dyn Publisher<Message>>,
    status: Option<Box<dyn Publisher<NodeStatus>>>,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new(
        node: ChangeDetectNode,
        input: Box<dyn Subscriber<Message>>,
        forward: Box<dyn Publisher<Message>>,
        rejected: Box<dyn Publisher<Message>>,
    ) -> Self {
        Self {
            node,
            input,
            forward,
            rejected,
            status: None,
            stats: PipelineStats::default(),
        }
    }

    /// Publish node status changes out of band
    pub fn with_status(mut self, status: Box<dyn Publisher<NodeStatus>>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn node(&self) -> &ChangeDetectNode {
        &self.node
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Run one message through the node and publish it
    ///
    /// Returns the output used, `None` if the message was dropped.
    pub async fn step(&mut self, msg: Message) -> Result<Option<Output>, TransportError> {
        self.stats.received += 1;
        let previous_status = self.node.status().clone();

        let output = match self.node.on_input(msg).await {
            Ok(routed) => {
                let output = routed.output();
                let msg = routed.into_message();
                match output {
                    Output::Forward => {
                        self.forward.publish(&msg).await?;
                        self.stats.forwarded += 1;
                    }
                    Output::Rejected => {
                        self.rejected.publish(&msg).await?;
                        self.stats.rejected += 1;
                    }
                }
                debug!("[{}] -> {}", self.node.id(), output.subject());
                Some(output)
            }
            Err(err) => {
                // Already logged by the node
                debug!("[{}] dropped: {}", self.node.id(), err);
                self.stats.dropped += 1;
                None
            }
        };

        if let Some(status) = &self.status {
            if self.node.status() != &previous_status {
                debug!(
                    "[{}] -> {}: {:?}",
                    self.node.id(),
                    Subjects::STATUS,
                    self.node.status()
                );
                status.publish(self.node.status()).await?;
            }
        }

        Ok(output)
    }

    /// Consume the input until it closes
    pub async fn run(mut self) -> Result<PipelineStats, TransportError> {
        let id = self.node.id();
        info!(
            "[{}] pipeline started, outputs {} and {}",
            id,
            Subjects::node_output(id, Output::Forward),
            Subjects::node_output(id, Output::Rejected)
        );

        loop {
            match self.input.next().await {
                Ok(msg) => {
                    self.step(msg).await?;
                }
                Err(TransportError::ChannelClosed) => break,
                Err(err) => return Err(err),
            }
        }

        info!(
            "[{}] pipeline finished: received={} forwarded={} rejected={} dropped={}",
            self.node.id(),
            self.stats.received,
            self.stats.forwarded,
            self.stats.rejected,
            self.stats.dropped
        );
        Ok(self.stats)
    }
}
