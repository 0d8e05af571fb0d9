use crate::config::ReportConfig;
use anyhow::{Result, bail};
use proctwin_engine::{AutomationRequest, Error, ReportGenerator, ReportRequest};
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Report generator backed by an external program.
///
/// The payload JSON is written to the program's stdin and its stdout is the
/// generated text. `PROCTWIN_REQUEST` tells the program which kind of text
/// is wanted (`report` or `automations`).
#[derive(Debug, Clone)]
pub struct CommandReportGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandReportGenerator {
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let Some((program, args)) = config.command.split_first() else {
            bail!("No report generator configured: set `command` in the [report] section of the config");
        };
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn run<T: Serialize>(&self, kind: &str, payload: &T) -> proctwin_engine::Result<String> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| Error::Report(format!("failed to serialize payload: {}", e)))?;

        debug!(program = %self.program, kind, bytes = body.len(), "running report command");

        #[cfg(unix)]
        let _sigpipe = SigpipeIgnored::new();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("PROCTWIN_REQUEST", kind)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Report(format!("failed to start `{}`: {}", self.program, e)))?;

        // Feed stdin from its own thread so a command that streams output
        // while reading can't fill its stdout pipe and stall both sides
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || match stdin.write_all(&body) {
                // A command that exits without reading its input is judged by its status
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Report(format!("`{}` did not finish: {}", self.program, e)))?;

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| Error::Report("payload writer panicked".to_string()))?
                .map_err(|e| Error::Report(format!("failed to send payload: {}", e)))?;
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Report(format!(
                "`{}` exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

/// Ignores SIGPIPE until dropped.
///
/// The binary restores the default SIGPIPE action for its own stdout, which
/// would kill the process when a command closes its stdin early. While this
/// guard lives, that write fails with `BrokenPipe` instead.
#[cfg(unix)]
struct SigpipeIgnored(libc::sighandler_t);

#[cfg(unix)]
impl SigpipeIgnored {
    fn new() -> Self {
        // SAFETY: swapping a signal disposition; the previous one is restored on drop
        Self(unsafe { libc::signal(libc::SIGPIPE, libc::SIG_IGN) })
    }
}

#[cfg(unix)]
impl Drop for SigpipeIgnored {
    fn drop(&mut self) {
        // SAFETY: restores the disposition saved in `new`
        unsafe {
            libc::signal(libc::SIGPIPE, self.0);
        }
    }
}

impl ReportGenerator for CommandReportGenerator {
    fn report(&self, request: &ReportRequest) -> proctwin_engine::Result<String> {
        self.run("report", request)
    }

    fn automations(&self, request: &AutomationRequest) -> proctwin_engine::Result<String> {
        self.run("automations", request)
    }
}
