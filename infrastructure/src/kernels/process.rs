//! Interpreter subprocesses with stdin input and captured output.

use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Characters of stderr kept in error messages.
const STDERR_TAIL: usize = 2_000;

#[derive(Debug)]
pub(crate) struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Last part of stderr, or the exit code when stderr is empty.
    pub fn error_tail(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            return match self.code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
        }
        let start = stderr
            .char_indices()
            .rev()
            .nth(STDERR_TAIL)
            .map(|(i, _)| i)
            .unwrap_or(0);
        stderr[start..].to_string()
    }
}

/// Run `interpreter -c <driver> <args...>` with `input` on stdin.
///
/// The child is killed if the returned future is dropped.
pub(crate) async fn run_driver(
    interpreter: &str,
    driver: &str,
    args: &[&Path],
    extra: &[&str],
    input: &str,
) -> std::io::Result<ProcessOutput> {
    let mut command = Command::new(interpreter);
    command
        .arg("-c")
        .arg(driver)
        .args(args)
        .args(extra)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn()?;
    let feeder = child.stdin.take().map(|mut stdin| {
        let input = input.to_string();
        tokio::spawn(async move {
            // A child that exits without reading closes the pipe early.
            if let Err(e) = stdin.write_all(input.as_bytes()).await
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(e);
            }
            drop(stdin);
            Ok(())
        })
    });

    let output = child.wait_with_output().await?;
    if let Some(feeder) = feeder {
        feeder.await.map_err(std::io::Error::other)??;
    }
    Ok(ProcessOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: Option<i32>, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_error_tail_without_stderr() {
        assert_eq!(output(Some(2), "").error_tail(), "exited with status 2");
        assert_eq!(output(None, " ").error_tail(), "terminated by signal");
    }

    #[test]
    fn test_error_tail_keeps_end() {
        let long = format!("{}NameError: foo", "x".repeat(5_000));
        let tail = output(Some(1), &long).error_tail();
        assert!(tail.ends_with("NameError: foo"));
        assert!(tail.len() <= STDERR_TAIL + 1);
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_io_error() {
        let result = run_driver("qforge-no-such-interpreter", "pass", &[], &[], "").await;
        assert!(result.is_err());
    }
}
