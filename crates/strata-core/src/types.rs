//! Core type definitions for decoded jj output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StrataError;

/// Placeholder text for unknown identities and identifiers
pub const UNKNOWN_TEXT: &str = "<unknown>";

/// Placeholder text for commits without a description
pub const NO_DESC_TEXT: &str = "<no description set>";

/// Description shown for the root commit
pub const ROOT_COMMIT_DESC: &str = "<root>";

/// JJ Change ID (reverse-hex string)
pub type ChangeId = String;

/// JJ Commit ID (hex string)
pub type CommitId = String;

/// Per-file status reported by `jj diff --summary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
}

impl DiffStatus {
    /// Single-letter code used in summary output
    pub fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Modified => 'M',
            Self::Renamed => 'R',
            Self::Copied => 'C',
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<char> for DiffStatus {
    type Error = StrataError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'A' => Ok(Self::Added),
            'D' => Ok(Self::Deleted),
            'M' => Ok(Self::Modified),
            'R' => Ok(Self::Renamed),
            'C' => Ok(Self::Copied),
            other => Err(StrataError::Parse(format!(
                "Unexpected diff status: {}",
                other
            ))),
        }
    }
}

/// One decoded summary line
///
/// At least one of `before_path` / `after_path` is always set:
/// additions and copies carry only `after_path`, deletions only
/// `before_path`, modifications and renames both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub status: DiffStatus,
    pub before_path: Option<String>,
    pub after_path: Option<String>,
}

impl DiffEntry {
    pub fn added(path: impl Into<String>) -> Self {
        Self {
            status: DiffStatus::Added,
            before_path: None,
            after_path: Some(path.into()),
        }
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self {
            status: DiffStatus::Deleted,
            before_path: Some(path.into()),
            after_path: None,
        }
    }

    pub fn modified(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            status: DiffStatus::Modified,
            before_path: Some(path.clone()),
            after_path: Some(path),
        }
    }

    pub fn renamed(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            status: DiffStatus::Renamed,
            before_path: Some(before.into()),
            after_path: Some(after.into()),
        }
    }

    pub fn copied(after: impl Into<String>) -> Self {
        Self {
            status: DiffStatus::Copied,
            before_path: None,
            after_path: Some(after.into()),
        }
    }

    /// The path this entry is about: the after-path when present, otherwise the before-path
    pub fn path(&self) -> &str {
        self.after_path
            .as_deref()
            .or(self.before_path.as_deref())
            .unwrap_or_default()
    }
}

/// Author/committer signature emitted by `json(author)` / `json(committer)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            timestamp,
        }
    }

    fn unknown() -> Self {
        Self::new(UNKNOWN_TEXT, UNKNOWN_TEXT, Utc::now())
    }

    pub fn safe_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNKNOWN_TEXT
        } else {
            &self.name
        }
    }

    pub fn safe_email(&self) -> &str {
        if self.email.trim().is_empty() {
            UNKNOWN_TEXT
        } else {
            &self.email
        }
    }
}

/// Bookmark reference embedded in commit records (`json(b)` per bookmark)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRef {
    pub name: String,
    /// Target commits; more than one entry (or `None`s) means the bookmark is conflicted
    pub target: Vec<Option<CommitId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(
        default,
        alias = "trackingTarget",
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_target: Option<Vec<CommitId>>,
}

impl BookmarkRef {
    pub fn is_conflicted(&self) -> bool {
        self.target.len() != 1 || self.target.iter().any(Option::is_none)
    }
}

/// Bookmark entry returned by `jj bookmark list`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookmarkName {
    pub name: String,
}

/// A commit as decoded from one line of `jj log` template output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub commit_id: CommitId,
    pub change_id: ChangeId,
    /// Parent commit IDs, in parent order
    pub parents: Vec<CommitId>,
    pub bookmarks: Vec<BookmarkRef>,
    pub author: Signature,
    pub committer: Signature,
    /// Full commit description
    pub description: String,
    /// First line of the description
    pub short_description: String,
    pub is_root: bool,
}

impl CommitRecord {
    /// Stand-in record for a commit that could not be looked up
    pub fn placeholder(commit_id: impl Into<CommitId>) -> Self {
        Self {
            commit_id: commit_id.into(),
            change_id: UNKNOWN_TEXT.to_string(),
            parents: Vec::new(),
            bookmarks: Vec::new(),
            author: Signature::unknown(),
            committer: Signature::unknown(),
            description: NO_DESC_TEXT.to_string(),
            short_description: NO_DESC_TEXT.to_string(),
            is_root: false,
        }
    }

    pub fn readable_description(&self) -> &str {
        readable(self.is_root, &self.description)
    }

    pub fn readable_short_description(&self) -> &str {
        readable(self.is_root, &self.short_description)
    }

    /// Names of the bookmarks pointing at this commit
    pub fn bookmark_names(&self) -> impl Iterator<Item = &str> {
        self.bookmarks.iter().map(|b| b.name.as_str())
    }
}

fn readable(is_root: bool, text: &str) -> &str {
    if is_root {
        ROOT_COMMIT_DESC
    } else if text.is_empty() {
        NO_DESC_TEXT
    } else {
        text
    }
}
