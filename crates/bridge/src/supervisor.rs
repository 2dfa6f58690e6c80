//! Child process supervision.
//!
//! One coordinating future owns the child, both output pipes and the deadline timer. It races
//! process exit, the deadline, and reads on stdout/stderr inside a single `select!` loop; the
//! value that loop breaks with is the only terminal event of the run. Whatever happens after
//! that (a late exit after we signalled the child, trailing output) cannot change it.

use std::future::pending;
use std::io;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// After a normal exit, grandchildren may still hold the pipes open. Keep draining for at
/// most this long past the deadline.
const DRAIN_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub deadline: Duration,
    pub kill_grace: Duration,
}

/// First terminal event observed for a run.
#[derive(Debug)]
pub(crate) enum Terminal {
    Exited(ExitStatus),
    DeadlineElapsed,
    WaitFailed(io::Error),
}

#[derive(Debug)]
pub(crate) struct Captured {
    pub terminal: Terminal,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Time from dispatch to the terminal event.
    pub elapsed: Duration,
}

/// Spawn `command` and supervise it under `limits`.
///
/// `Err` means the child never started; no timer or stream state exists in that case.
/// On every `Ok` path the child has been reaped before returning.
pub(crate) async fn run(mut command: Command, limits: Limits) -> io::Result<Captured> {
    let started = Instant::now();
    let mut child = command.spawn()?;
    log::debug!("Spawned Auggie CLI (pid={:?})", child.id());

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let mut out = Vec::new();
    let mut err = Vec::new();

    let deadline = tokio::time::sleep(limits.deadline);
    tokio::pin!(deadline);

    let terminal = loop {
        tokio::select! {
            biased;

            status = child.wait() => {
                break match status {
                    Ok(status) => Terminal::Exited(status),
                    Err(error) => Terminal::WaitFailed(error),
                };
            }
            () = &mut deadline => break Terminal::DeadlineElapsed,
            open = read_chunk(&mut stdout, &mut out), if stdout.is_some() => {
                if !open {
                    stdout = None;
                }
            }
            open = read_chunk(&mut stderr, &mut err), if stderr.is_some() => {
                if !open {
                    stderr = None;
                }
            }
        }
    };
    let elapsed = started.elapsed();

    match &terminal {
        Terminal::Exited(_) => {
            let budget = limits.deadline.saturating_sub(elapsed).max(DRAIN_GRACE);
            let drained = tokio::time::timeout(budget, async {
                tokio::join!(
                    drain(&mut stdout, &mut out),
                    drain(&mut stderr, &mut err)
                )
            })
            .await;
            if drained.is_err() {
                log::debug!("Auggie CLI exited but its output pipes stayed open; keeping what was read");
            }
        }
        Terminal::DeadlineElapsed => {
            log::warn!(
                "Auggie CLI exceeded its {}s deadline; terminating",
                limits.deadline.as_secs_f64()
            );
            if let Err(error) = terminate(&mut child, limits.kill_grace).await {
                log::warn!("Failed to terminate Auggie CLI after deadline: {error}");
            }
        }
        Terminal::WaitFailed(error) => {
            log::warn!("Waiting on Auggie CLI failed: {error}; killing it");
            if let Err(error) = child.kill().await {
                log::warn!("Failed to kill Auggie CLI: {error}");
            }
        }
    }

    Ok(Captured {
        terminal,
        stdout: out,
        stderr: err,
        elapsed,
    })
}

/// Read one chunk into `buf`. Returns `false` once the stream is closed or broken.
///
/// Cancel safe: a completed read is appended within the same poll.
async fn read_chunk<R>(reader: &mut Option<R>, buf: &mut Vec<u8>) -> bool
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader.as_mut() else {
        return pending().await;
    };
    let mut chunk = [0u8; READ_CHUNK_BYTES];
    match reader.read(&mut chunk).await {
        Ok(0) => false,
        Ok(n) => {
            buf.extend_from_slice(&chunk[..n]);
            true
        }
        Err(error) => {
            log::debug!("Auggie CLI output stream failed: {error}");
            false
        }
    }
}

async fn drain<R>(reader: &mut Option<R>, buf: &mut Vec<u8>)
where
    R: AsyncRead + Unpin,
{
    if let Some(reader) = reader.as_mut() {
        if let Err(error) = reader.read_to_end(buf).await {
            log::debug!("Draining Auggie CLI output failed: {error}");
        }
    }
}

/// SIGTERM, wait up to `grace`, then SIGKILL. Always reaps the child.
async fn terminate(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id().and_then(|pid| libc::pid_t::try_from(pid).ok()) {
            unsafe {
                let _ = libc::kill(pid, libc::SIGTERM);
            }
            if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
                return status;
            }
            log::warn!(
                "Auggie CLI (pid={pid}) ignored SIGTERM for {}ms; sending SIGKILL",
                grace.as_millis()
            );
        }
    }
    #[cfg(not(unix))]
    let _ = grace;

    child.kill().await?;
    child.wait().await
}
