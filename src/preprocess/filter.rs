use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread;

use tracing::debug;

use crate::preprocess::PreprocessError;

/// External text filter run once per sentence.
///
/// Every call spawns the command through the platform shell, writes one line
/// to its stdin, closes it, reads stdout and reaps the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreProcessFilter {
    command: String,
}

/// Kills and reaps the child unless it was waited on explicitly.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn wait(&mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Write `sentence` and a newline, then close the pipe. A filter is free to
/// ignore its input, so a broken pipe is not an error.
fn write_line(stdin: Option<ChildStdin>, sentence: &str) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    let written = stdin
        .write_all(sentence.as_bytes())
        .and_then(|_| stdin.write_all(b"\n"));
    match written {
        Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
        _ => Ok(()),
    }
}

fn shell(command: &str) -> Command {
    let (program, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
    let mut cmd = Command::new(program);
    cmd.arg(flag).arg(command);
    cmd
}

impl PreProcessFilter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Pipe `sentence` through the command and return its first output line.
    pub fn process(&self, sentence: &str) -> Result<String, PreprocessError> {
        debug!(command = %self.command, "running preprocessing filter");

        let child = shell(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let mut guard = ChildGuard {
            child,
            reaped: false,
        };

        let stdin = guard.child.stdin.take();
        let stdout = guard.child.stdout.take();

        // stdin is fed from a second thread while this one drains stdout, so a
        // filter that echoes as it reads never stalls on a full pipe.
        let raw = thread::scope(|scope| -> Result<String, PreprocessError> {
            let writer = scope.spawn(move || write_line(stdin, sentence));

            let mut raw = String::new();
            let read = match stdout {
                Some(mut stdout) => stdout.read_to_string(&mut raw).map(|_| ()),
                None => Ok(()),
            };
            if read.is_err() {
                // Unblock the writer before joining it.
                let _ = guard.child.kill();
            }

            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("filter writer panicked")));
            read?;
            written?;
            Ok(raw)
        })?;

        let status = guard.wait()?;
        if !status.success() {
            return Err(PreprocessError::Filter {
                command: self.command.clone(),
                status: status.code(),
            });
        }

        Ok(raw.lines().next().unwrap_or("").to_string())
    }
}
