//! # strata-jj
//!
//! JJ integration layer for strata.
//!
//! This crate provides:
//! - A revset/pattern expression tree rendered into jj's exact syntax
//! - Template builders that make jj print JSON lines
//! - Decoders for `jj diff --summary` and JSON-lines commit output
//! - JJ command execution abstraction and typed command wrappers

mod bookmarks;
mod changes;
mod command;
pub mod diff;
mod log;
mod pattern;
pub mod records;
mod render;
mod revset;
pub mod template;

pub use bookmarks::BookmarkCommand;
pub use changes::{CommitCommand, ConfigCommand, DiffCommand, FileCommand, RestoreCommand};
pub use command::{JjCommand, JjExecutor, JjOutput, MockJjExecutor};
pub use diff::{parse_summary, parse_summary_line};
pub use log::{LogCommand, ShowCommand};
pub use pattern::{Pattern, PatternOperatorKind, PatternType};
pub use records::{decode_records, BOOKMARK_TEMPLATE, COMMIT_TEMPLATE};
pub use render::{escape, Render};
pub use revset::{Arg, OperatorKind, Revset};
