//! Bookmark listing
//!
//! Bookmarks are read through `jj bookmark list` with [`BOOKMARK_TEMPLATE`],
//! which prints one `{"name": ...}` object per bookmark.

use std::collections::BTreeSet;

use strata_core::{BookmarkName, Result};
use tracing::{debug, instrument};

use crate::command::JjExecutor;
use crate::records::{decode_bookmarks, BOOKMARK_TEMPLATE};
use crate::render::Render;
use crate::revset::Revset;

/// Wrapper for `jj bookmark` commands
pub struct BookmarkCommand<E: JjExecutor> {
    executor: E,
}

impl<E: JjExecutor> BookmarkCommand<E> {
    /// Create a new bookmark command wrapper
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Bookmarks, optionally restricted to those pointing into `revset`
    ///
    /// Executes: `jj bookmark list --quiet --color=never [-r R] -T {template}`
    #[instrument(skip(self))]
    pub async fn bookmark_refs(&self, revset: Option<&Revset>) -> Result<Vec<BookmarkName>> {
        let rendered = revset.map(|r| r.render());
        let mut args = vec!["bookmark", "list", "--quiet", "--color=never"];
        if let Some(rendered) = rendered.as_deref() {
            args.push("-r");
            args.push(rendered);
        }
        args.push("-T");
        args.push(BOOKMARK_TEMPLATE.as_str());

        let output = self.executor.exec(&args).await?.check("list bookmarks")?;
        let bookmarks = decode_bookmarks(&output)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        debug!("Listed {} bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    /// Distinct bookmark names, sorted
    pub async fn bookmark_names(&self, revset: Option<&Revset>) -> Result<BTreeSet<String>> {
        Ok(self
            .bookmark_refs(revset)
            .await?
            .into_iter()
            .map(|b| b.name)
            .collect())
    }
}
