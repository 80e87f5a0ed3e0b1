//! `jj log` and `jj show` queries
//!
//! Both commands are driven by a template; the commit queries use
//! [`COMMIT_TEMPLATE`] and decode one [`CommitRecord`] per output line.

use strata_core::{CommitId, CommitRecord, Result};
use tracing::{debug, instrument, warn};

use crate::command::JjExecutor;
use crate::records::{decode_lines, first_non_blank_line, COMMIT_TEMPLATE};
use crate::render::Render;
use crate::revset::Revset;

/// Wrapper for `jj log` queries
pub struct LogCommand<E: JjExecutor> {
    executor: E,
    default_limit: Option<usize>,
}

impl<E: JjExecutor> LogCommand<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            default_limit: None,
        }
    }

    /// Limit used when a query passes none
    pub fn with_default_limit(mut self, limit: Option<usize>) -> Self {
        self.default_limit = limit;
        self
    }

    /// Run `jj log` with an arbitrary template and return raw stdout
    ///
    /// Executes: `jj log --quiet --no-graph --color=never [-r R] [-n N] -T T`
    #[instrument(skip(self, template))]
    pub async fn execute_with_template(
        &self,
        template: &str,
        revset: Option<&Revset>,
        limit: Option<usize>,
    ) -> Result<String> {
        let mut args = vec![
            "log".to_string(),
            "--quiet".to_string(),
            "--no-graph".to_string(),
            "--color=never".to_string(),
        ];
        if let Some(revset) = revset {
            args.push("-r".to_string());
            args.push(revset.render());
        }
        if let Some(limit) = limit.or(self.default_limit).filter(|n| *n > 0) {
            args.push("-n".to_string());
            args.push(limit.to_string());
        }
        args.push("-T".to_string());
        args.push(template.to_string());

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.executor.exec(&args).await?.check("run jj log")
    }

    /// Decode the commits matched by `revset`
    ///
    /// The first line that fails to decode aborts the query.
    #[instrument(skip(self))]
    pub async fn commits(
        &self,
        revset: Option<&Revset>,
        limit: Option<usize>,
    ) -> Result<Vec<CommitRecord>> {
        let output = self
            .execute_with_template(COMMIT_TEMPLATE.as_str(), revset, limit)
            .await?;

        let commits = decode_lines::<CommitRecord>(&output)
            .map(|result| {
                result.inspect_err(|e| warn!("Discarding jj log output: {}", e))
            })
            .collect::<Result<Vec<CommitRecord>>>()?;

        debug!("Decoded {} commits", commits.len());
        Ok(commits)
    }

    /// First non-blank line printed by `template`
    pub async fn read_first_non_blank_line(
        &self,
        template: &str,
        revset: Option<&Revset>,
    ) -> Result<Option<String>> {
        let output = self.execute_with_template(template, revset, None).await?;
        Ok(first_non_blank_line(&output).map(str::to_string))
    }
}

/// Wrapper for `jj show` queries targeting a single revision
pub struct ShowCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> ShowCommand<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Executes: `jj show --quiet --color=never --no-patch -T T [R]`
    async fn execute_with_template(&self, template: &str, revset: Option<&Revset>) -> Result<String> {
        let rendered = revset.map(|r| r.render());
        let mut args = vec!["show", "--quiet", "--color=never", "--no-patch", "-T", template];
        if let Some(rendered) = rendered.as_deref() {
            args.push(rendered);
        }
        self.executor.exec(&args).await?.check("run jj show")
    }

    /// Decode the single commit selected by `revset` (the working copy when `None`)
    #[instrument(skip(self))]
    pub async fn commit(&self, revset: Option<&Revset>) -> Result<Option<CommitRecord>> {
        let output = self.execute_with_template(COMMIT_TEMPLATE.as_str(), revset).await?;
        match first_non_blank_line(&output) {
            Some(line) => Ok(decode_lines(line).next().transpose()?),
            None => Ok(None),
        }
    }

    async fn commit_id(&self, revset: Option<&Revset>) -> Result<Option<CommitId>> {
        let output = self.execute_with_template("commit_id", revset).await?;
        Ok(first_non_blank_line(&output).map(str::to_string))
    }

    /// Commit ID of the working copy (`@`)
    pub async fn working_copy_commit_id(&self) -> Result<Option<CommitId>> {
        self.commit_id(None).await
    }

    /// Description of a revision, `None` when it is blank
    pub async fn description(&self, revset: Option<&Revset>) -> Result<Option<String>> {
        let output = self.execute_with_template("description", revset).await?;
        let description = output.trim_end();
        if description.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(description.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{JjOutput, MockJjExecutor};
    use strata_core::StrataError;

    const COMMIT_A: &str = r#"{"commitId":"aaa111","changeId":"qpvuntsm","parents":["bbb222"],"bookmarks":[],"author":{"name":"Ada","email":"ada@example.com","timestamp":"2024-05-01T10:00:00Z"},"committer":{"name":"Ada","email":"ada@example.com","timestamp":"2024-05-01T10:00:00Z"},"description":"Second\n","shortDescription":"Second","isRoot":false}"#;
    const COMMIT_B: &str = r#"{"commitId":"bbb222","changeId":"rlvkpnrz","parents":["000000"],"bookmarks":[{"name":"main","target":["bbb222"]}],"author":{"name":"Ada","email":"ada@example.com","timestamp":"2024-04-30T09:00:00Z"},"committer":{"name":"Ada","email":"ada@example.com","timestamp":"2024-04-30T09:00:00Z"},"description":"First\n","shortDescription":"First","isRoot":false}"#;

    fn log_key(revset: &str, limit: Option<usize>) -> String {
        let mut key = format!("log --quiet --no-graph --color=never -r {}", revset);
        if let Some(limit) = limit {
            key.push_str(&format!(" -n {}", limit));
        }
        format!("{} -T {}", key, COMMIT_TEMPLATE.as_str())
    }

    #[tokio::test]
    async fn test_commits_in_output_order() {
        let executor = MockJjExecutor::new().with_response(
            &log_key("(::@)", Some(2)),
            JjOutput::ok(format!("{}\n{}\n", COMMIT_A, COMMIT_B)),
        );

        let log = LogCommand::new(executor);
        let revset = Revset::range_with_root(None, Some(Revset::WORKING_COPY));
        let commits = log.commits(Some(&revset), Some(2)).await.unwrap();

        let ids: Vec<&str> = commits.iter().map(|c| c.commit_id.as_str()).collect();
        assert_eq!(ids, vec!["aaa111", "bbb222"]);
        assert_eq!(commits[1].bookmarks[0].name, "main");
    }

    #[tokio::test]
    async fn test_default_limit_applies() {
        let executor = MockJjExecutor::new()
            .with_response(&log_key("all()", Some(50)), JjOutput::ok(format!("{}\n", COMMIT_B)));

        let log = LogCommand::new(executor).with_default_limit(Some(50));
        let commits = log.commits(Some(&Revset::ALL), None).await.unwrap();
        assert_eq!(commits.len(), 1);
    }

    #[tokio::test]
    async fn test_commits_abort_on_bad_line() {
        let executor = MockJjExecutor::new().with_response(
            &log_key("@", None),
            JjOutput::ok(format!("{}\nnot json\n", COMMIT_A)),
        );

        let log = LogCommand::new(executor);
        let err = log.commits(Some(&Revset::WORKING_COPY), None).await.unwrap_err();
        assert!(matches!(err, StrataError::Decode { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_failed_log_is_an_error() {
        let executor = MockJjExecutor::new().with_response(
            &log_key("commit_id(zzz)", None),
            JjOutput::failed("Error: Revision `zzz` doesn't exist"),
        );

        let log = LogCommand::new(executor);
        let err = log
            .commits(Some(&Revset::commit_id("zzz")), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StrataError::JjCommand(_)));
    }

    #[tokio::test]
    async fn test_read_first_non_blank_line() {
        let executor = MockJjExecutor::new().with_response(
            "log --quiet --no-graph --color=never -r @ -T change_id",
            JjOutput::ok("\nqpvuntsm\n"),
        );

        let log = LogCommand::new(executor);
        let line = log
            .read_first_non_blank_line("change_id", Some(&Revset::WORKING_COPY))
            .await
            .unwrap();
        assert_eq!(line.as_deref(), Some("qpvuntsm"));
    }

    #[tokio::test]
    async fn test_show_commit() {
        let executor = MockJjExecutor::new().with_response(
            &format!(
                "show --quiet --color=never --no-patch -T {} (@-)",
                COMMIT_TEMPLATE.as_str()
            ),
            JjOutput::ok(format!("\n{}\n", COMMIT_B)),
        );

        let show = ShowCommand::new(executor);
        let commit = show
            .commit(Some(&Revset::parent_of(Revset::WORKING_COPY)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(commit.change_id, "rlvkpnrz");
    }

    #[tokio::test]
    async fn test_show_working_copy_and_description() {
        let executor = MockJjExecutor::new()
            .with_response(
                "show --quiet --color=never --no-patch -T commit_id",
                JjOutput::ok("aaa111\n"),
            )
            .with_response(
                "show --quiet --color=never --no-patch -T description",
                JjOutput::ok("\n\n"),
            )
            .with_response(
                "show --quiet --color=never --no-patch -T description (@-)",
                JjOutput::ok("Fix parser\n\nDetails\n"),
            );

        let show = ShowCommand::new(executor);
        assert_eq!(
            show.working_copy_commit_id().await.unwrap().as_deref(),
            Some("aaa111")
        );
        assert_eq!(show.description(None).await.unwrap(), None);
        assert_eq!(
            show.description(Some(&Revset::parent_of(Revset::WORKING_COPY)))
                .await
                .unwrap()
                .as_deref(),
            Some("Fix parser\n\nDetails")
        );
    }
}
