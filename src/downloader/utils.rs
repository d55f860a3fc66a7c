// Helper functions for running the engine process

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use super::errors::EngineError;

/// Run a command to completion, capturing stdout and stderr.
///
/// The child is killed if the returned future is dropped or the optional
/// timeout elapses.
pub async fn run_output(
    program: &str,
    args: &[String],
    timeout_after: Option<Duration>,
) -> Result<Output, EngineError> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| EngineError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let mut stdout_pipe = child.stdout.take().ok_or_else(|| {
        EngineError::Failed(format!("Failed to capture stdout from {}", program))
    })?;
    let mut stderr_pipe = child.stderr.take().ok_or_else(|| {
        EngineError::Failed(format!("Failed to capture stderr from {}", program))
    })?;

    // Drain both pipes while waiting so a chatty child can't fill one and stall
    let collect = async {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let (out_res, err_res, status) = tokio::join!(
            stdout_pipe.read_to_end(&mut stdout),
            stderr_pipe.read_to_end(&mut stderr),
            child.wait(),
        );
        out_res?;
        err_res?;
        Ok::<Output, std::io::Error>(Output {
            status: status?,
            stdout,
            stderr,
        })
    };

    match timeout_after {
        Some(limit) => match timeout(limit, collect).await {
            Ok(output) => Ok(output?),
            // the child is killed on drop when we return
            Err(_) => Err(EngineError::TimedOut(limit)),
        },
        None => Ok(collect.await?),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout_and_status() {
        let args = vec!["-c".to_string(), "printf hello; printf oops >&2".to_string()];
        let output = run_output("sh", &args, None).await.unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, b"hello");
        assert_eq!(output.stderr, b"oops");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = run_output("definitely-not-a-real-binary-xyz", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let args = vec!["-c".to_string(), "sleep 5".to_string()];
        let err = run_output("sh", &args, Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        match err {
            EngineError::TimedOut(limit) => assert_eq!(limit, Duration::from_millis(100)),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            EngineError::TimedOut(Duration::from_millis(100)).to_string(),
            "Timed out after 100ms"
        );
    }
}
