//! Bounded-timeout execution of read-only probe commands
//!
//! A command that cannot be spawned, fails while waiting, or exceeds its
//! timeout yields exit code `-1` with the failure description as output.
//! Execution failure is a valid probe outcome and is never returned as an error.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Exit code reported when a command could not run to completion
pub const EXEC_FAILED: i32 = -1;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of a probe command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    /// Stdout followed by stderr, or the failure description
    pub output: String,
}

impl CommandOutput {
    pub fn completed(exit_code: i32, output: String) -> Self {
        Self { exit_code, output }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            exit_code: EXEC_FAILED,
            output: description.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes probe commands on behalf of the probe layer
pub trait CommandRunner {
    fn run(&self, argv: &[&str], cwd: &Path, timeout: Duration) -> CommandOutput;
}

/// Runs commands as real subprocesses
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[&str], cwd: &Path, timeout: Duration) -> CommandOutput {
        let Some((program, args)) = argv.split_first() else {
            return CommandOutput::failure("Empty command");
        };

        debug!("Running probe command: {} {:?}", program, args);

        let spawned = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return CommandOutput::failure(format!("{} not found", program));
            }
            Err(e) => {
                return CommandOutput::failure(format!("Failed to run {}: {}", program, e));
            }
        };

        // Pipes are drained on their own threads so a chatty command cannot
        // stall on a full pipe while we poll for exit.
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let start = Instant::now();
        let deadline = start + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() > timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        warn!(
                            "{} timed out after {:.1}s",
                            program,
                            timeout.as_secs_f64()
                        );
                        return CommandOutput::failure(format!(
                            "{} timed out after {:.1}s",
                            program,
                            timeout.as_secs_f64()
                        ));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return CommandOutput::failure(format!(
                        "Failed to wait for {}: {}",
                        program, e
                    ));
                }
            }
        };

        // A grandchild may still hold the pipes open; collect until the deadline only
        let mut output = collect_reader(stdout, deadline, program);
        output.push_str(&collect_reader(stderr, deadline, program));
        CommandOutput::completed(status.code().unwrap_or(EXEC_FAILED), output)
    }
}

/// Refuses every command; used when probe commands are disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRunner;

impl CommandRunner for DisabledRunner {
    fn run(&self, argv: &[&str], _cwd: &Path, _timeout: Duration) -> CommandOutput {
        CommandOutput::failure(format!(
            "Probe commands disabled (skipped `{}`)",
            argv.join(" ")
        ))
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a reader until `deadline`; a reader still blocked then is abandoned
fn collect_reader(reader: Option<Receiver<Vec<u8>>>, deadline: Instant, program: &str) -> String {
    let Some(rx) = reader else {
        return String::new();
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => {
            debug!("{} output still open at deadline, dropping it", program);
            String::new()
        }
    }
}
