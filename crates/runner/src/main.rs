use clap::Parser;
use delta_clock::SystemClock;
use delta_core::Message;
use delta_gateway::{JsonLinesPublisher, Output, QueuePublisher};
use delta_runner::{ChangeDetectNode, Pipeline, load_config, load_default_config};
use delta_store::InMemoryStateStore;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

/// Filter JSON messages from stdin, one per line
///
/// Each message is written to stdout as `{"output": "forward"|"rejected", "msg": ...}`.
#[derive(Parser, Debug)]
#[command(name = "delta-filter", version)]
struct Cli {
    /// Node configuration file (JSON); without it every message passes
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input queue capacity
    #[arg(long, default_value_t = 1024)]
    capacity: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };
    info!("Starting delta-filter: {:?}", config);

    let node = ChangeDetectNode::new(
        config,
        Arc::new(InMemoryStateStore::new()),
        Arc::new(SystemClock::new()),
    )?;

    let stdout = Arc::new(Mutex::new(tokio::io::stdout()));
    let forward = JsonLinesPublisher::new(stdout.clone(), Output::Forward.name());
    let rejected = JsonLinesPublisher::new(stdout, Output::Rejected.name());

    let (input_tx, input_rx) = QueuePublisher::pair(cli.capacity);
    let stdin = BufReader::new(tokio::io::stdin());
    let reader = tokio::spawn(read_messages(stdin, input_tx));

    let pipeline = Pipeline::new(
        node,
        Box::new(input_rx),
        Box::new(forward),
        Box::new(rejected),
    );
    let stats = pipeline.run().await?;
    reader.await??;

    info!("Done: {:?}", stats);
    Ok(())
}

/// Feed input lines into the pipeline; closes the input at EOF
///
/// Lines that are not UTF-8 or not JSON are logged and skipped.
async fn read_messages<R>(mut reader: R, input: QueuePublisher<Message>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut line_no = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(err) => {
                warn!("line {}: not UTF-8: {}", line_no, err);
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Message>(line) {
            Ok(msg) => input.send(msg).await?,
            Err(err) => warn!("line {}: not a JSON message: {}", line_no, err),
        }
    }

    Ok(())
}
