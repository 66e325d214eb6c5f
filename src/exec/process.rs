// src/exec/process.rs

//! Spawn one gauge process, relay its output and wait for it.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWrite;
use tokio::process::{Child, Command};
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::command::GaugeCommand;
use crate::errors::{ExecutionFailure, Interruption};
use crate::exec::interrupt::{already_interrupted, interrupted};
use crate::exec::relay::{RelayHandle, RelayPhase, RelayStream, spawn_relay};

/// How long a relay may sit waiting on a still-open source after the child
/// exited (e.g. a grandchild holding the pipe) before it is aborted. A relay
/// that is writing, or that already reached end of input, is never cut off.
pub const RELAY_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub type Sink = Box<dyn AsyncWrite + Send + Unpin>;

/// Where the child's output ends up.
pub struct OutputSinks {
    pub stdout: Sink,
    pub stderr: Sink,
}

impl OutputSinks {
    /// Our own stdout/stderr.
    pub fn inherit() -> Self {
        Self {
            stdout: Box::new(tokio::io::stdout()),
            stderr: Box::new(tokio::io::stderr()),
        }
    }

    pub fn discard() -> Self {
        Self {
            stdout: Box::new(tokio::io::sink()),
            stderr: Box::new(tokio::io::sink()),
        }
    }
}

/// Run `command` to completion.
///
/// - The child's stdout/stderr are piped and relayed to `sinks` by two
///   independent tasks started before the wait.
/// - If `interrupt` fires first, the child is killed and the relays are
///   aborted.
/// - Relays never outlive this call.
pub async fn run_process(
    command: &GaugeCommand,
    sinks: OutputSinks,
    mut interrupt: Option<watch::Receiver<bool>>,
) -> Result<(), ExecutionFailure> {
    let program = command.program().to_string();

    if already_interrupted(&interrupt) {
        return Err(ExecutionFailure::Interrupted {
            program,
            source: Interruption::Cancelled,
        });
    }

    info!(program = %program, args = ?command.args(), "starting gauge process");

    let mut child = Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecutionFailure::Spawn {
            program: program.clone(),
            source,
        })?;

    let OutputSinks { stdout, stderr } = sinks;
    let relays = [
        child
            .stdout
            .take()
            .map(|out| spawn_relay(RelayStream::Stdout, out, stdout)),
        child
            .stderr
            .take()
            .map(|err| spawn_relay(RelayStream::Stderr, err, stderr)),
    ];

    let waited = tokio::select! {
        status = child.wait() => Some(status),
        () = interrupted(&mut interrupt) => None,
    };

    match waited {
        Some(Ok(status)) => {
            drain_relays(relays).await;

            let code = status.code();
            info!(
                program = %program,
                exit_code = ?code,
                success = status.success(),
                "gauge process exited"
            );

            if status.success() {
                Ok(())
            } else {
                Err(ExecutionFailure::NonZeroExit { program, code })
            }
        }
        Some(Err(e)) => {
            warn!(program = %program, error = %e, "waiting for gauge process failed");
            kill_child(&mut child, &program).await;
            abort_relays(relays).await;
            Err(ExecutionFailure::Interrupted {
                program,
                source: Interruption::Wait(e),
            })
        }
        None => {
            info!(program = %program, "interruption requested; killing gauge process");
            kill_child(&mut child, &program).await;
            abort_relays(relays).await;
            Err(ExecutionFailure::Interrupted {
                program,
                source: Interruption::Cancelled,
            })
        }
    }
}

async fn kill_child(child: &mut Child, program: &str) {
    if let Err(e) = child.kill().await {
        warn!(program = %program, error = %e, "failed to kill gauge process");
    }
}

async fn drain_relays([out, err]: [Option<RelayHandle>; 2]) {
    tokio::join!(drain_relay(out), drain_relay(err));
}

/// Wait for a relay to reach end of input and flush it, however slow our
/// sink is. Only an idle read longer than [`RELAY_DRAIN_TIMEOUT`] gets the
/// relay abandoned.
async fn drain_relay(relay: Option<RelayHandle>) {
    let Some(RelayHandle {
        stream,
        mut task,
        mut phase,
    }) = relay
    else {
        return;
    };

    loop {
        let idle_deadline = match *phase.borrow_and_update() {
            RelayPhase::Reading => Some(Instant::now() + RELAY_DRAIN_TIMEOUT),
            RelayPhase::Writing | RelayPhase::Eof => None,
        };

        tokio::select! {
            res = &mut task => {
                match res {
                    Ok(bytes) => debug!(%stream, bytes, "relay finished"),
                    Err(e) => warn!(%stream, error = %e, "relay task failed"),
                }
                return;
            }
            changed = phase.changed() => {
                if changed.is_err() {
                    // Sender dropped: the task is returning.
                    if let Err(e) = (&mut task).await {
                        warn!(%stream, error = %e, "relay task failed");
                    }
                    return;
                }
            }
            () = idle_until(idle_deadline) => {
                warn!(%stream, "source still open after the process exited; abandoning relay");
                task.abort();
                let _ = task.await;
                return;
            }
        }
    }
}

async fn idle_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

async fn abort_relays(relays: [Option<RelayHandle>; 2]) {
    for relay in relays.into_iter().flatten() {
        relay.task.abort();
        let _ = relay.task.await;
    }
}
