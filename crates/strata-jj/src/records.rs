//! JSON-lines templates and their decoders
//!
//! [`COMMIT_TEMPLATE`] and [`BOOKMARK_TEMPLATE`] are passed to `jj log -T` /
//! `jj bookmark list -T`; the output they produce is decoded here one line
//! at a time. A line that fails to decode is reported in place so the
//! caller decides whether to skip it or abort the batch.

use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use strata_core::{BookmarkName, CommitRecord, Result, StrataError};

use crate::template::{json, mapped_list, serializable_template};

/// Template emitting one [`CommitRecord`] per line
pub static COMMIT_TEMPLATE: LazyLock<String> = LazyLock::new(|| {
    serializable_template([
        ("commitId", json("commit_id")),
        ("changeId", json("change_id")),
        ("parents", mapped_list("parents", "|p| json(p.commit_id())")),
        ("bookmarks", mapped_list("bookmarks", "|b| json(b)")),
        ("author", json("author")),
        ("committer", json("committer")),
        ("description", json("description")),
        ("shortDescription", json("description.first_line()")),
        ("isRoot", json("root")),
    ])
});

/// Template emitting one [`BookmarkName`] per line
pub static BOOKMARK_TEMPLATE: LazyLock<String> =
    LazyLock::new(|| serializable_template([("name", json("name"))]));

/// Decode line-delimited JSON, one item per non-blank line, in input order
///
/// Failures carry the 1-based line number within `raw`.
pub fn decode_lines<T: DeserializeOwned>(raw: &str) -> impl Iterator<Item = Result<T>> + '_ {
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|e| StrataError::Decode {
                line: line_no,
                message: e.to_string(),
            })
        })
}

/// Decode the output of [`COMMIT_TEMPLATE`]
pub fn decode_records(raw: &str) -> Vec<Result<CommitRecord>> {
    decode_lines(raw).collect()
}

/// Decode the output of [`BOOKMARK_TEMPLATE`]
pub fn decode_bookmarks(raw: &str) -> Vec<Result<BookmarkName>> {
    decode_lines(raw).collect()
}

/// First non-blank line of `raw`, trimmed
pub fn first_non_blank_line(raw: &str) -> Option<&str> {
    raw.lines().map(str::trim).find(|line| !line.is_empty())
}
