//! Generator adapter that runs an external program per call.
//!
//! The request is written to the program's stdin as one JSON document and
//! the response is read from stdout. A document of the form
//! `{"error": "..."}` is treated as a rejection. The child is killed if the
//! call is dropped, which is how the navigator's timeout stops it.

use std::{io::ErrorKind, path::PathBuf, process::Stdio};

use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::{io::AsyncWriteExt, process::Command};

use super::{
    ContentGenerator, GenerationTarget, GeneratorError, RegeneratedTask, TaskRegenerationRequest,
};
use crate::models::RoadmapData;

/// Runs `program args...` for every generation call.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: PathBuf,
    args: Vec<String>,
}

#[derive(Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
enum WireRequest<'a> {
    GenerateRoadmap { target: &'a GenerationTarget },
    RegenerateTask(&'a TaskRegenerationRequest),
}

impl CommandGenerator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends arguments passed on every invocation.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: &WireRequest<'_>,
    ) -> Result<T, GeneratorError> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| GeneratorError::Malformed(format!("cannot encode request: {e}")))?;

        debug!("Running generator {}", self.program.display());
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| GeneratorError::Spawn(format!("{}: {e}", self.program.display())))?;

        if let Some(mut stdin) = child.stdin.take() {
            // Programs that answer without reading their input close the pipe early.
            if let Err(e) = stdin.write_all(&payload).await {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(GeneratorError::Spawn(format!("writing request: {e}")));
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| GeneratorError::Spawn(format!("waiting for generator: {e}")))?;

        if !output.status.success() {
            return Err(GeneratorError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_response(&output.stdout)
    }
}

fn parse_response<T: DeserializeOwned>(stdout: &[u8]) -> Result<T, GeneratorError> {
    let value: Value =
        serde_json::from_slice(stdout).map_err(|e| GeneratorError::Malformed(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(GeneratorError::Rejected(message.to_string()));
    }

    serde_json::from_value(value).map_err(|e| GeneratorError::Malformed(e.to_string()))
}

#[async_trait]
impl ContentGenerator for CommandGenerator {
    async fn generate_roadmap(
        &self,
        target: &GenerationTarget,
    ) -> Result<RoadmapData, GeneratorError> {
        self.call(&WireRequest::GenerateRoadmap { target }).await
    }

    async fn regenerate_task(
        &self,
        request: &TaskRegenerationRequest,
    ) -> Result<RegeneratedTask, GeneratorError> {
        self.call(&WireRequest::RegenerateTask(request)).await
    }
}
