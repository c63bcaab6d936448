//! Spawn a resolved node and wait for it.
//!
//! Screen output inherits the parent's stdio. Log output pipes both streams
//! and drains them on helper threads while the child runs, so a chatty child
//! never blocks on a full pipe.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use scoutspawn_core::launch::OutputMode;
use scoutspawn_core::LaunchError;

/// Outcome of one spawned process.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code, or -1 when the process was terminated by a signal.
    pub exit_code: i32,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

fn forward_lines<R: Read + Send + 'static>(
    reader: R,
    name: String,
    stream: &'static str,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            match line {
                Ok(line) => tracing::info!(target: "scoutspawn::node", node = %name, stream, "{}", line),
                Err(_) => break,
            }
        }
    })
}

/// Run `program` with `args` to completion.
pub fn run(
    program: &Path,
    args: &[String],
    output: OutputMode,
    label: &str,
) -> Result<ExecutionResult, LaunchError> {
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    match output {
        OutputMode::Screen => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        OutputMode::Log => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
    }

    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .map_err(|e| LaunchError::io(format!("spawn {}", program.display()), e))?;
    tracing::info!(node = %label, pid = child.id(), "Process started");

    let readers: Vec<_> = [
        child
            .stdout
            .take()
            .map(|out| forward_lines(out, label.to_string(), "stdout")),
        child
            .stderr
            .take()
            .map(|err| forward_lines(err, label.to_string(), "stderr")),
    ]
    .into_iter()
    .flatten()
    .collect();

    let status = child
        .wait()
        .map_err(|e| LaunchError::io(format!("wait for {}", program.display()), e))?;
    for handle in readers {
        let _ = handle.join();
    }

    let result = ExecutionResult {
        exit_code: status.code().unwrap_or(-1),
        duration: start.elapsed(),
    };
    if result.success() {
        tracing::info!(node = %label, "Process finished cleanly");
    } else {
        tracing::error!(
            node = %label,
            exit_code = result.exit_code,
            "Process has died"
        );
    }
    Ok(result)
}
