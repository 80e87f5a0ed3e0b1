//! Working-copy and file-level commands: diff, file show, config, commit, restore

use strata_core::{DiffEntry, Result};
use tracing::{debug, instrument};

use crate::command::JjExecutor;
use crate::diff::parse_summary;
use crate::render::Render;
use crate::revset::Revset;

/// Wrapper for `jj diff`
pub struct DiffCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> DiffCommand<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Raw summary output for `revset`
    ///
    /// Executes: `jj diff --summary --color=never -r R`
    #[instrument(skip(self))]
    pub async fn summary(&self, revset: &Revset) -> Result<String> {
        let rendered = revset.render();
        self.executor
            .exec(&["diff", "--summary", "--color=never", "-r", &rendered])
            .await?
            .check("read diff summary")
    }

    /// Decoded summary entries for `revset`
    pub async fn entries(&self, revset: &Revset) -> Result<Vec<DiffEntry>> {
        let entries = parse_summary(&self.summary(revset).await?)?;
        debug!("Decoded {} diff entries", entries.len());
        Ok(entries)
    }
}

/// Wrapper for `jj file`
pub struct FileCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> FileCommand<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Contents of `path` at `revset` (the working copy when `None`)
    ///
    /// Executes: `jj file show --quiet --color=never [-r R] PATH`
    #[instrument(skip(self))]
    pub async fn contents(&self, path: &str, revset: Option<&Revset>) -> Result<String> {
        let rendered = revset.map(|r| r.render());
        let mut args = vec!["file", "show", "--quiet", "--color=never"];
        if let Some(rendered) = rendered.as_deref() {
            args.push("-r");
            args.push(rendered);
        }
        args.push(path);
        self.executor.exec(&args).await?.check("read file contents")
    }
}

/// Wrapper for `jj config`
pub struct ConfigCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> ConfigCommand<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Value of `key`, or `None` when it is unset or jj reports an error
    pub async fn value(&self, key: &str) -> Result<Option<String>> {
        let output = self.executor.exec(&["config", "get", key]).await?;
        if !output.success {
            debug!("jj config get {} failed: {}", key, output.stderr.trim());
            return Ok(None);
        }
        let value = output.stdout.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}

/// Wrapper for `jj commit`
pub struct CommitCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> CommitCommand<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Commit the working copy, limited to `paths` when non-empty
    ///
    /// Executes: `jj commit -m MSG [-- PATHS...]`
    #[instrument(skip(self, message))]
    pub async fn commit(&self, message: &str, paths: &[&str]) -> Result<()> {
        let mut args = vec!["commit", "-m", message];
        if !paths.is_empty() {
            args.push("--");
            args.extend_from_slice(paths);
        }
        self.executor.exec(&args).await?.check("commit")?;
        Ok(())
    }
}

/// Wrapper for `jj restore`
pub struct RestoreCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> RestoreCommand<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Restore workspace-relative `paths` in the working copy; no-op when empty
    ///
    /// Executes: `jj restore --quiet --color=never -- PATHS...`
    #[instrument(skip(self))]
    pub async fn restore(&self, paths: &[&str]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["restore", "--quiet", "--color=never", "--"];
        args.extend_from_slice(paths);
        self.executor.exec(&args).await?.check("restore paths")?;
        Ok(())
    }
}
