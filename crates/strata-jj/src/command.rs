//! JJ command execution abstraction

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;
use strata_core::{Result, StrataConfig, StrataError};
use tokio::process::Command;
use tracing::{debug, instrument};

/// Output from a JJ command
#[derive(Debug, Clone)]
pub struct JjOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl JjOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// Failed output with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }

    /// Stdout of a successful run, or the stderr as a `JjCommand` error
    pub fn check(self, what: &str) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(StrataError::JjCommand(format!(
                "Failed to {}: {}",
                what,
                self.stderr.trim()
            )))
        }
    }
}

impl From<Output> for JjOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// Trait for executing JJ commands (allows mocking in tests)
#[async_trait]
pub trait JjExecutor: Send + Sync {
    /// Execute a JJ command with the given arguments
    async fn exec(&self, args: &[&str]) -> Result<JjOutput>;

    /// Get the repository root
    fn repo_root(&self) -> &PathBuf;
}

/// Real JJ command executor
#[derive(Clone)]
pub struct JjCommand {
    repo_root: PathBuf,
    binary: String,
    timeout: Duration,
}

impl JjCommand {
    /// Create a new JJ command executor for the given repository
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self::with_config(repo_root, &StrataConfig::default())
    }

    /// Create an executor using the binary and timeout from `config`
    pub fn with_config(repo_root: impl Into<PathBuf>, config: &StrataConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            binary: config.jj_binary.clone(),
            timeout: Duration::from_secs(config.exec_timeout_secs),
        }
    }

    /// Auto-detect repository root from current directory
    pub async fn detect(config: &StrataConfig) -> Result<Self> {
        let output = Command::new(&config.jj_binary)
            .args(["root"])
            .output()
            .await
            .map_err(|e| StrataError::JjCommand(format!("Failed to run jj root: {}", e)))?;

        if !output.status.success() {
            return Err(StrataError::JjCommand("Not in a jj repository".to_string()));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::with_config(root, config))
    }
}

#[async_trait]
impl JjExecutor for JjCommand {
    #[instrument(skip(self), fields(repo = %self.repo_root.display()))]
    async fn exec(&self, args: &[&str]) -> Result<JjOutput> {
        debug!("Executing {} {:?}", self.binary, args);

        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .current_dir(&self.repo_root)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| StrataError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| StrataError::JjCommand(format!("Failed to execute jj: {}", e)))?;

        let jj_output = JjOutput::from(output);

        if !jj_output.success {
            debug!("JJ command failed: {}", jj_output.stderr);
        }

        Ok(jj_output)
    }

    fn repo_root(&self) -> &PathBuf {
        &self.repo_root
    }
}

/// Mock JJ executor for testing
#[derive(Clone)]
pub struct MockJjExecutor {
    repo_root: PathBuf,
    responses: HashMap<String, JjOutput>,
}

impl Default for MockJjExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJjExecutor {
    pub fn new() -> Self {
        Self {
            repo_root: PathBuf::from("/mock/repo"),
            responses: HashMap::new(),
        }
    }

    /// Register a response for the space-joined argument list
    pub fn with_response(mut self, command: &str, output: JjOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }
}

#[async_trait]
impl JjExecutor for MockJjExecutor {
    async fn exec(&self, args: &[&str]) -> Result<JjOutput> {
        let key = args.join(" ");
        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| StrataError::JjCommand(format!("No mock response for: {}", key)))
    }

    fn repo_root(&self) -> &PathBuf {
        &self.repo_root
    }
}
