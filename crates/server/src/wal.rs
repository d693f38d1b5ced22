//! Append-only raw-line log and startup replay.
//!
//! Accepted lines are written verbatim, one per line, so a restart replays
//! exactly what was ingested, through the same validation path.

use std::io;
use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{info, warn};

use logpile_core::validate;
use logpile_store::StoreHandle;

/// Serialized writer over the append-only log file.
pub struct WalWriter {
    file: Mutex<File>,
}

impl WalWriter {
    pub async fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Append one accepted raw line. Writes are serialized through the
    /// mutex so concurrent ingest requests cannot interleave partial lines.
    pub async fn append(&self, line: &str) -> io::Result<()> {
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}

/// Replay the log file into the store, in file order.
///
/// Runs before the listener starts so a fresh process serves its full
/// history. The file only ever receives validated lines, so a line that no
/// longer validates means external corruption; it is skipped with a warning
/// rather than refusing to start. Returns the number of replayed records.
pub async fn replay(path: &Path, store: &StoreHandle) -> anyhow::Result<u64> {
    if !path.exists() {
        return Ok(0);
    }

    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut replayed = 0u64;
    let mut line_no = 0u64;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        match validate(&line) {
            Ok(document) => {
                store.insert(document).await?;
                replayed += 1;
            }
            Err(e) => {
                warn!(
                    line = line_no,
                    kind = e.kind(),
                    "skipping unreplayable record: {}",
                    e
                );
            }
        }
    }

    info!("Replayed {} records from {}", replayed, path.display());
    Ok(replayed)
}
