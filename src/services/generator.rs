//! Recipe generation worker bridge.
//!
//! One worker process per request: the request payload is written as
//! JSON to the worker's stdin, the worker's stdout is parsed as JSON,
//! and the exit code is the success/failure signal. A semaphore caps
//! the number of concurrently running workers and a timeout bounds how
//! long any single worker may run.

use crate::error::AppError;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Semaphore;

/// Spawns and supervises generation worker processes.
#[derive(Clone)]
pub struct GeneratorService {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl GeneratorService {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        timeout: Duration,
        max_concurrent: usize,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Run one generation request through a fresh worker process.
    ///
    /// The input value is forwarded verbatim; the worker's stdout JSON
    /// is returned as-is unless it carries an `error` field, which is
    /// surfaced as the failure reason.
    pub async fn generate(&self, input: &serde_json::Value) -> Result<serde_json::Value, AppError> {
        // Queue behind the admission cap rather than rejecting.
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AppError::Worker("worker pool closed".to_string()))?;

        let payload = serde_json::to_vec(input)
            .map_err(|e| AppError::Worker(format!("failed to encode worker input: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Worker(format!("failed to spawn worker: {}", e)))?;

        // Write the payload and close stdin so the worker sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .await
                .map_err(|e| AppError::Worker(format!("failed to write worker input: {}", e)))?;
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!(
                    program = %self.program,
                    timeout_secs = self.timeout.as_secs(),
                    "Generation worker timed out"
                );
                AppError::Worker("generation timed out".to_string())
            })?
            .map_err(|e| AppError::Worker(format!("failed to wait for worker: {}", e)))?;

        if !output.stderr.is_empty() {
            tracing::warn!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "Generation worker stderr"
            );
        }

        if !output.status.success() {
            tracing::error!(
                code = output.status.code().unwrap_or(-1),
                "Generation worker exited with failure"
            );
            return Err(AppError::Worker("error generating recipe".to_string()));
        }

        let result: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|_| AppError::Worker("error parsing worker output".to_string()))?;

        // The worker reports its own failures as an `error` field.
        if let Some(message) = result.get("error").and_then(|e| e.as_str()) {
            return Err(AppError::Worker(message.to_string()));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shell_worker(script: &str) -> GeneratorService {
        GeneratorService::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            Duration::from_secs(5),
            2,
        )
    }

    #[tokio::test]
    async fn successful_worker_output_is_returned() {
        let service = shell_worker(r#"cat > /dev/null; echo '{"recommendation":"x"}'"#);
        let result = service.generate(&json!({"preference": "spicy"})).await;
        assert_eq!(result.unwrap(), json!({"recommendation": "x"}));
    }

    #[tokio::test]
    async fn input_is_forwarded_to_stdin() {
        // Echo stdin back: the output should equal the input payload.
        let service = shell_worker("cat");
        let input = json!({"preference": "noodles", "get_details": false});
        let result = service.generate(&input).await.unwrap();
        assert_eq!(result, input);
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let service = shell_worker("cat > /dev/null; exit 1");
        let err = service.generate(&json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::Worker(_)));
    }

    #[tokio::test]
    async fn unparseable_output_is_an_error() {
        let service = shell_worker("cat > /dev/null; echo not-json");
        let err = service.generate(&json!({})).await.unwrap_err();
        match err {
            AppError::Worker(msg) => assert!(msg.contains("parsing")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn worker_error_field_is_surfaced() {
        let service = shell_worker(r#"cat > /dev/null; echo '{"error":"model offline"}'"#);
        let err = service.generate(&json!({})).await.unwrap_err();
        match err {
            AppError::Worker(msg) => assert_eq!(msg, "model offline"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_worker_is_killed_on_timeout() {
        let service = GeneratorService::new(
            "sh",
            vec!["-c".to_string(), "sleep 30".to_string()],
            Duration::from_millis(200),
            2,
        );
        let err = service.generate(&json!({})).await.unwrap_err();
        match err {
            AppError::Worker(msg) => assert!(msg.contains("timed out")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
