//! String, file and date patterns
//!
//! Patterns only appear as arguments to revset functions such as `files()`,
//! `description()` or `committer_date()`.

use strata_core::{Result, StrataError};

/// Pattern kind prefix (`substring:`, `regex:`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    Substring,
    Regex,
    /// Workspace-relative path, matching the file or everything below it
    Root,
    DateAfter,
    DateBefore,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Regex => "regex",
            Self::Root => "root",
            Self::DateAfter => "after",
            Self::DateBefore => "before",
        }
    }
}

/// Placement of a pattern operator token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOperatorKind {
    /// `a | b | c`
    Infix,
    /// `~a`
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternKind {
    Expression {
        ty: PatternType,
        text: String,
        case_sensitive: bool,
    },
    Operator {
        token: String,
        kind: PatternOperatorKind,
        operands: Vec<Pattern>,
    },
}

/// A pattern expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) kind: PatternKind,
}

impl Pattern {
    fn expression(ty: PatternType, text: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            kind: PatternKind::Expression {
                ty,
                text: text.into(),
                case_sensitive,
            },
        }
    }

    /// An operator over patterns; fails on a blank token or no operands
    pub fn operator(
        token: impl Into<String>,
        kind: PatternOperatorKind,
        operands: Vec<Pattern>,
    ) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(StrataError::Validation(
                "Pattern operator token cannot be blank".to_string(),
            ));
        }
        if operands.is_empty() {
            return Err(StrataError::Validation(format!(
                "Pattern operator '{}' requires at least one operand",
                token
            )));
        }
        Ok(Self {
            kind: PatternKind::Operator {
                token,
                kind,
                operands,
            },
        })
    }

    pub fn substring(text: impl Into<String>, case_sensitive: bool) -> Self {
        Self::expression(PatternType::Substring, text, case_sensitive)
    }

    pub fn regex(regex: impl Into<String>, case_sensitive: bool) -> Self {
        Self::expression(PatternType::Regex, regex, case_sensitive)
    }

    /// Workspace-relative file (or directory) path
    pub fn root(path: impl Into<String>, case_sensitive: bool) -> Self {
        Self::expression(PatternType::Root, path, case_sensitive)
    }

    pub fn date_after(date: impl Into<String>) -> Self {
        Self::expression(PatternType::DateAfter, date, true)
    }

    pub fn date_before(date: impl Into<String>) -> Self {
        Self::expression(PatternType::DateBefore, date, true)
    }

    /// `a | b | ...`
    pub fn or(patterns: Vec<Pattern>) -> Result<Self> {
        Self::operator("|", PatternOperatorKind::Infix, patterns)
    }

    /// `a & b & ...`
    pub fn and(patterns: Vec<Pattern>) -> Result<Self> {
        Self::operator("&", PatternOperatorKind::Infix, patterns)
    }

    /// `~pattern`
    pub fn negate(pattern: Pattern) -> Self {
        Self {
            kind: PatternKind::Operator {
                token: "~".to_string(),
                kind: PatternOperatorKind::Prefix,
                operands: vec![pattern],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Render;

    #[test]
    fn test_or_of_root_paths() {
        let pattern = Pattern::or(vec![
            Pattern::root("src/main/kotlin", true),
            Pattern::root("src/main/java", true),
        ])
        .unwrap();
        assert_eq!(
            pattern.render(),
            "root:\"src/main/kotlin\" | root:\"src/main/java\""
        );
    }

    #[test]
    fn test_case_insensitive_suffix() {
        assert_eq!(
            Pattern::substring("Abc", false).render(),
            "substring-i:\"Abc\""
        );
        assert_eq!(Pattern::regex("^fix", true).render(), "regex:\"^fix\"");
        assert_eq!(Pattern::root("README.md", false).render(), "root-i:\"README.md\"");
    }

    #[test]
    fn test_date_patterns_are_case_sensitive() {
        assert_eq!(
            Pattern::date_before("2 weeks ago").render(),
            "before:\"2 weeks ago\""
        );
        assert_eq!(
            Pattern::date_after("2024-06-01").render(),
            "after:\"2024-06-01\""
        );
    }

    #[test]
    fn test_and_and_negate() {
        let pattern = Pattern::and(vec![
            Pattern::root("src", true),
            Pattern::negate(Pattern::root("src/generated", true)),
        ])
        .unwrap();
        assert_eq!(pattern.render(), "root:\"src\" & ~root:\"src/generated\"");
    }

    #[test]
    fn test_single_operand_renders_bare() {
        let pattern = Pattern::or(vec![Pattern::substring("x", true)]).unwrap();
        assert_eq!(pattern.render(), "substring:\"x\"");
    }

    #[test]
    fn test_operator_requires_operands() {
        assert!(matches!(Pattern::or(vec![]), Err(StrataError::Validation(_))));
        assert!(matches!(Pattern::and(vec![]), Err(StrataError::Validation(_))));
        assert!(Pattern::operator("", PatternOperatorKind::Infix, vec![Pattern::root("a", true)]).is_err());
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            Pattern::substring(r#"say "hi" \o/"#, true).render(),
            r#"substring:"say \"hi\" \\o/""#
        );
    }
}
