// src/exec/relay.rs

//! Live copy of a child's output stream to one of ours.

use std::fmt;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelayStream {
    Stdout,
    Stderr,
}

impl fmt::Display for RelayStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayStream::Stdout => f.write_str("stdout"),
            RelayStream::Stderr => f.write_str("stderr"),
        }
    }
}

/// What a relay is currently blocked on.
///
/// Only `Reading` can stall indefinitely (a grandchild holding the pipe
/// open); `Writing` always makes progress as fast as our own sink allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelayPhase {
    Reading,
    Writing,
    Eof,
}

/// A spawned relay plus a view of its phase.
pub(crate) struct RelayHandle {
    pub(crate) stream: RelayStream,
    pub(crate) task: JoinHandle<u64>,
    pub(crate) phase: watch::Receiver<RelayPhase>,
}

/// Copy `reader` into `writer` until end of input, flushing every chunk.
///
/// Returns the number of bytes read from `reader`. If the writer fails the
/// rest of the input is still drained (and discarded) so the child never
/// blocks on a full pipe.
pub(crate) async fn relay<R, W>(
    stream: RelayStream,
    reader: &mut R,
    writer: &mut W,
    phase: &watch::Sender<RelayPhase>,
) -> u64
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    let mut writer_ok = true;

    loop {
        phase.send_replace(RelayPhase::Reading);
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                warn!(%stream, error = %e, "reading child output failed; stopping relay");
                break;
            }
        };
        total += n as u64;

        if writer_ok {
            phase.send_replace(RelayPhase::Writing);
            let written = async {
                writer.write_all(&buf[..n]).await?;
                writer.flush().await
            }
            .await;
            if let Err(e) = written {
                warn!(%stream, error = %e, "writing relayed output failed; discarding the rest");
                writer_ok = false;
            }
        }
    }

    phase.send_replace(RelayPhase::Eof);
    debug!(%stream, bytes = total, "relay reached end of input");
    total
}

/// Run [`relay`] on its own Tokio task.
pub(crate) fn spawn_relay<R, W>(stream: RelayStream, mut reader: R, mut writer: W) -> RelayHandle
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (phase_tx, phase_rx) = watch::channel(RelayPhase::Reading);
    let task = tokio::spawn(async move { relay(stream, &mut reader, &mut writer, &phase_tx).await });
    RelayHandle {
        stream,
        task,
        phase: phase_rx,
    }
}
