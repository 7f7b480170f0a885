//! [`CommandRunner`] implementation that spawns real processes.

use crate::traits::CommandRunner;
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

/// Spawns programs with [`std::process::Command`] and waits for them.
///
/// There is no timeout: an unresponsive utility blocks the caller until it
/// exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

/// Errors from running an external program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write input to {program}: {source}")]
    Stdin {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}{}", stderr_suffix(.stderr))]
    Status {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("{program} printed non-UTF-8 output")]
    Utf8 { program: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl CommandRunner for SystemRunner {
    type Error = ExecError;

    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> Result<String, ExecError> {
        debug!("exec {} {:?}", program, args);
        let spawn_err = |source: std::io::Error| ExecError::Spawn {
            program: program.to_string(),
            source,
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Dropping the handle closes the pipe so the child sees EOF.  A
        // failed write is reported only after the child has been reaped.
        let written = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => pipe.write_all(input.as_bytes()),
            _ => Ok(()),
        };

        let output = child.wait_with_output().map_err(spawn_err)?;
        if !output.status.success() {
            return Err(ExecError::Status {
                program: program.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        written.map_err(|source| ExecError::Stdin {
            program: program.to_string(),
            source,
        })?;
        String::from_utf8(output.stdout).map_err(|_| ExecError::Utf8 {
            program: program.to_string(),
        })
    }
}
