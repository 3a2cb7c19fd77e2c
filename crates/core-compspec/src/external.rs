//! External completer protocol (`complete -C`).
//!
//! The program is spawned with bash/zsh compatible context:
//!
//! * args: `$1` command name, `$2` word under the cursor, `$3` previous word.
//! * env: `COMP_LINE`, `COMP_POINT`, `COMP_KEY=9`, `COMP_TYPE=9` (bash) and
//!   `BUFFER`, `CURSOR`, `LBUFFER`, `RBUFFER` (zsh). `LBUFFER` is omitted when
//!   the cursor is past the end of the line, `RBUFFER` when it is at or past
//!   the end.
//!
//! `COMP_POINT` is a byte index into `COMP_LINE`, as bash reports it.
//! `CURSOR` is a character index, as zsh reports it. The two differ once the
//! text before the cursor holds multibyte characters.
//!
//! Spawning is the only blocking I/O in the editor. Every run is bounded by a
//! timeout; the child is killed when the timeout drops its future. Callers
//! turn any [`CompleterError`] into an empty candidate list.

use crate::context::CompletionContext;
use core_text::{byte_offset, rune_len, rune_slice};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::{debug, trace};

/// Tab, as bash reports it in `COMP_KEY` / `COMP_TYPE`.
const TAB_KEY: &str = "9";

#[derive(Debug, Error)]
pub enum CompleterError {
    #[error("empty completer command")]
    EmptyCommand,
    #[error("failed to spawn completer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("completer `{program}` timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("completer `{program}` exited with {status}")]
    NonZeroExit { program: String, status: ExitStatus },
    #[error("completer `{program}` wrote non-UTF-8 output")]
    InvalidUtf8 { program: String },
    #[error("failed to start completer runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Runs an external completer and returns its raw stdout.
pub trait ExternalCompleterRunner {
    fn run(&self, program: &str, ctx: &CompletionContext) -> Result<String, CompleterError>;
}

/// Positional arguments `$1 $2 $3`.
pub fn completer_args(ctx: &CompletionContext) -> [String; 3] {
    [
        ctx.command().to_string(),
        ctx.current_word().to_string(),
        ctx.previous_word().to_string(),
    ]
}

/// Environment additions for the child process.
pub fn completer_env(ctx: &CompletionContext) -> Vec<(&'static str, String)> {
    let len = rune_len(&ctx.line);
    // Past the end the overshoot is kept as-is on top of the byte length.
    let byte_point = byte_offset(&ctx.line, ctx.cursor) + ctx.cursor.saturating_sub(len);
    let mut env = vec![
        ("COMP_LINE", ctx.line.clone()),
        ("COMP_POINT", byte_point.to_string()),
        ("COMP_KEY", TAB_KEY.to_string()),
        ("COMP_TYPE", TAB_KEY.to_string()),
        ("BUFFER", ctx.line.clone()),
        ("CURSOR", ctx.cursor.to_string()),
    ];
    if ctx.cursor <= len {
        env.push(("LBUFFER", rune_slice(&ctx.line, 0, ctx.cursor).to_string()));
    }
    if ctx.cursor < len {
        env.push(("RBUFFER", rune_slice(&ctx.line, ctx.cursor, len).to_string()));
    }
    env
}

/// Spawns completers with tokio under a fixed timeout.
///
/// The command string is split on whitespace: the first word is the program,
/// the rest are passed ahead of the three positional arguments.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn run_async(
        &self,
        program: &str,
        ctx: &CompletionContext,
    ) -> Result<String, CompleterError> {
        let mut words = program.split_whitespace();
        let exe = words.next().ok_or(CompleterError::EmptyCommand)?;
        let mut cmd = Command::new(exe);
        cmd.args(words)
            .args(completer_args(ctx))
            .envs(completer_env(ctx))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        trace!(target: "compspec.external", program, timeout_ms = self.timeout.as_millis() as u64, "spawn");
        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => {
                return Err(CompleterError::Timeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                });
            }
            Ok(Err(source)) => {
                return Err(CompleterError::Spawn {
                    program: program.to_string(),
                    source,
                });
            }
            Ok(Ok(output)) => output,
        };
        if !output.status.success() {
            return Err(CompleterError::NonZeroExit {
                program: program.to_string(),
                status: output.status,
            });
        }
        let stdout = String::from_utf8(output.stdout).map_err(|_| CompleterError::InvalidUtf8 {
            program: program.to_string(),
        })?;
        debug!(target: "compspec.external", program, bytes = stdout.len(), "completer_output");
        Ok(stdout)
    }
}

impl ExternalCompleterRunner for ProcessRunner {
    fn run(&self, program: &str, ctx: &CompletionContext) -> Result<String, CompleterError> {
        block_on_bounded(self.run_async(program, ctx))?
    }
}

// The editor calls completion sources synchronously. Inside a multi-thread
// runtime the worker is handed off with `block_in_place`; a current-thread
// runtime cannot block in place, so the future runs on a scoped thread with
// its own runtime. Outside any runtime a throwaway current-thread runtime is used.
fn block_on_bounded<F>(fut: F) -> Result<F::Output, CompleterError>
where
    F: Future + Send,
    F::Output: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(tokio::task::block_in_place(|| handle.block_on(fut)))
        }
        Ok(_) => std::thread::scope(|s| {
            s.spawn(|| fresh_runtime().map(|rt| rt.block_on(fut)))
                .join()
                .unwrap_or_else(|_| {
                    Err(CompleterError::Runtime(std::io::Error::other(
                        "completer thread panicked",
                    )))
                })
        }),
        Err(_) => fresh_runtime().map(|rt| rt.block_on(fut)),
    }
}

fn fresh_runtime() -> Result<tokio::runtime::Runtime, CompleterError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CompleterError::Runtime)
}
