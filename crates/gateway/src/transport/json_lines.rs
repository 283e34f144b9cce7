//! JSON-lines publisher
//!
//! Writes one `{"output": "<name>", "msg": <message>}` object per line to any
//! async writer. Several publishers can share one writer; lines never
//! interleave.

use crate::error::TransportError;
use crate::transport::Publisher;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

#[derive(Serialize)]
struct Line<'a, M> {
    output: &'a str,
    msg: &'a M,
}

/// Publisher that serializes each message as a tagged JSON line
pub struct JsonLinesPublisher<W> {
    writer: Arc<Mutex<W>>,
    output: String,
}

impl<W> JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: Arc<Mutex<W>>, output: impl Into<String>) -> Self {
        Self {
            writer,
            output: output.into(),
        }
    }

    /// Output name written on every line
    pub fn output(&self) -> &str {
        &self.output
    }
}

#[async_trait]
impl<M, W> Publisher<M> for JsonLinesPublisher<W>
where
    M: Serialize + Send + Sync,
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        let mut line = serde_json::to_vec(&Line {
            output: &self.output,
            msg,
        })?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }
}
