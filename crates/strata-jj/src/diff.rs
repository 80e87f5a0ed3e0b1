//! Decoder for `jj diff --summary` output
//!
//! Each summary line is `<status> <path>`. Renames and copies carry both
//! paths, either brace-compressed (`src/{old => new}.rs`) or expanded
//! (`old => new`, `old -> new`, with or without spaces around the arrow).

use strata_core::{DiffEntry, DiffStatus, Result};
use tracing::debug;

/// Arrow tokens, tried in order
const ARROWS: [&str; 4] = [" => ", "=>", " -> ", "->"];

/// Decode one summary line
///
/// Returns `Ok(None)` for lines that are not summary entries (blank, too
/// short, or no space after the status letter) and an error for an
/// unrecognized status letter.
pub fn parse_summary_line(line: &str) -> Result<Option<DiffEntry>> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let (Some(code), Some(' ')) = (chars.next(), chars.next()) else {
        return Ok(None);
    };
    let path = chars.as_str();
    if path.is_empty() {
        return Ok(None);
    }

    let entry = match DiffStatus::try_from(code)? {
        DiffStatus::Added => DiffEntry::added(path),
        DiffStatus::Deleted => DiffEntry::deleted(path),
        DiffStatus::Modified => DiffEntry::modified(path),
        DiffStatus::Renamed => {
            let (before, after) = decompress_rename_path(path);
            DiffEntry::renamed(before, after)
        }
        DiffStatus::Copied => {
            let (_, after) = decompress_rename_path(path);
            DiffEntry::copied(after)
        }
    };
    Ok(Some(entry))
}

/// Decode a whole summary, skipping lines that are not entries
pub fn parse_summary(output: &str) -> Result<Vec<DiffEntry>> {
    let mut entries = Vec::new();
    for line in output.lines() {
        match parse_summary_line(line)? {
            Some(entry) => entries.push(entry),
            None if !line.trim().is_empty() => debug!("Skipping non-summary line: {:?}", line),
            None => {}
        }
    }
    Ok(entries)
}

/// Expand a rename/copy path field into `(before, after)`
///
/// A field with neither braces nor an arrow decodes to the same path on
/// both sides.
pub fn decompress_rename_path(path: &str) -> (String, String) {
    let braces = path
        .find('{')
        .and_then(|open| path[open + 1..].find('}').map(|close| (open, open + 1 + close)));

    match braces {
        Some((open, close)) => {
            let prefix = &path[..open];
            let inside = &path[open + 1..close];
            let suffix = &path[close + 1..];
            let (before, after) = split_arrow(inside).unwrap_or((inside, inside));
            (
                format!("{}{}{}", prefix, before, suffix),
                format!("{}{}{}", prefix, after, suffix),
            )
        }
        None => match split_arrow(path) {
            Some((before, after)) => (before.to_string(), after.to_string()),
            None => (path.to_string(), path.to_string()),
        },
    }
}

fn split_arrow(part: &str) -> Option<(&str, &str)> {
    ARROWS.iter().find_map(|arrow| {
        part.split_once(arrow)
            .map(|(before, after)| (before.trim(), after.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::StrataError;

    fn parse(line: &str) -> DiffEntry {
        parse_summary_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_added_line() {
        let entry = parse("A foo.txt");
        assert_eq!(entry.status, DiffStatus::Added);
        assert_eq!(entry.before_path, None);
        assert_eq!(entry.after_path.as_deref(), Some("foo.txt"));
    }

    #[test]
    fn test_deleted_line() {
        let entry = parse("D bar.txt");
        assert_eq!(entry.status, DiffStatus::Deleted);
        assert_eq!(entry.before_path.as_deref(), Some("bar.txt"));
        assert_eq!(entry.after_path, None);
    }

    #[test]
    fn test_modified_line() {
        assert_eq!(parse("M src/Main.kt"), DiffEntry::modified("src/Main.kt"));
    }

    #[test]
    fn test_rename_with_braces() {
        assert_eq!(
            parse("R src/{Old => New}.kt"),
            DiffEntry::renamed("src/Old.kt", "src/New.kt")
        );
        assert_eq!(
            parse("R {a.txt => docs/b.txt}"),
            DiffEntry::renamed("a.txt", "docs/b.txt")
        );
        assert_eq!(
            parse("R lib/{core => util}/mod.rs"),
            DiffEntry::renamed("lib/core/mod.rs", "lib/util/mod.rs")
        );
    }

    #[test]
    fn test_rename_with_arrow_variants() {
        for line in [
            "R old/path => new/path",
            "R old/path=>new/path",
            "R old/path -> new/path",
            "R old/path->new/path",
        ] {
            assert_eq!(parse(line), DiffEntry::renamed("old/path", "new/path"), "{}", line);
        }
    }

    #[test]
    fn test_copy_keeps_only_after_path() {
        assert_eq!(parse("C src/{Old => New}.kt"), DiffEntry::copied("src/New.kt"));
        assert_eq!(parse("C a.rs -> b.rs"), DiffEntry::copied("b.rs"));
    }

    #[test]
    fn test_rename_without_arrow_keeps_path() {
        assert_eq!(parse("R same.txt"), DiffEntry::renamed("same.txt", "same.txt"));
        assert_eq!(parse("R dir/{same}.txt"), DiffEntry::renamed("dir/same.txt", "dir/same.txt"));
    }

    #[test]
    fn test_unclosed_brace_falls_back_to_arrow() {
        assert_eq!(parse("R {odd => name"), DiffEntry::renamed("{odd", "name"));
    }

    #[test]
    fn test_non_summary_lines_are_skipped() {
        assert!(parse_summary_line("not a summary line").unwrap().is_none());
        assert!(parse_summary_line("A").unwrap().is_none());
        assert!(parse_summary_line("A ").unwrap().is_none());
        assert!(parse_summary_line("").unwrap().is_none());
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        assert!(matches!(
            parse_summary_line("X nope.txt"),
            Err(StrataError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_summary_collects_entries_in_order() {
        let output = "M Cargo.toml\n\nA src/new.rs\nWarning: something odd\nR src/{a => b}.rs\n";
        let entries = parse_summary(output).unwrap();
        assert_eq!(
            entries,
            vec![
                DiffEntry::modified("Cargo.toml"),
                DiffEntry::added("src/new.rs"),
                DiffEntry::renamed("src/a.rs", "src/b.rs"),
            ]
        );
    }

    #[test]
    fn test_parse_summary_propagates_unknown_status() {
        assert!(parse_summary("M a\nZ b\n").is_err());
    }
}
