//! Revset expression tree
//!
//! A [`Revset`] is an immutable node in jj's revset language. Nodes are only
//! created through the constructors and builders here, which check arity and
//! token invariants up front; rendering (see [`crate::render`]) is then total.
//!
//! ```
//! use strata_jj::{Render, Revset};
//!
//! let revset = Revset::and(Revset::commit_id("abc"), Revset::parent_of(Revset::WORKING_COPY));
//! assert_eq!(revset.render(), "(commit_id(abc)&(@-))");
//! ```

use std::borrow::Cow;

use strata_core::{Result, StrataError};

use crate::pattern::Pattern;

/// How an operator places its token relative to its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// `a&b&c` (two or more operands)
    Infix,
    /// `a-` (exactly one operand)
    Postfix,
    /// `a::b` where either side may be omitted (zero to two operands)
    InfixStandalone,
}

/// A function argument: either a nested revset or a string pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Revset(Revset),
    Pattern(Pattern),
}

impl From<Revset> for Arg {
    fn from(revset: Revset) -> Self {
        Self::Revset(revset)
    }
}

impl From<Pattern> for Arg {
    fn from(pattern: Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RevsetKind {
    Symbol(Cow<'static, str>),
    StringLiteral(String),
    Function {
        name: Cow<'static, str>,
        args: Vec<Arg>,
    },
    Operator {
        token: Cow<'static, str>,
        operands: Vec<Revset>,
        kind: OperatorKind,
    },
}

/// A jj revset expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revset {
    pub(crate) kind: RevsetKind,
}

impl Revset {
    /// Empty placeholder, used for omitted sides of a range
    pub const EMPTY: Revset = Revset::from_kind(RevsetKind::Symbol(Cow::Borrowed("")));

    /// The working-copy commit (`@`)
    pub const WORKING_COPY: Revset = Revset::from_kind(RevsetKind::Symbol(Cow::Borrowed("@")));

    /// Every visible commit (`all()`)
    pub const ALL: Revset = Revset::from_kind(RevsetKind::Function {
        name: Cow::Borrowed("all"),
        args: Vec::new(),
    });

    const fn from_kind(kind: RevsetKind) -> Self {
        Self { kind }
    }

    /// A bare symbol, rendered verbatim
    ///
    /// No escaping is applied: only pass known-safe tokens such as commit
    /// hashes or `@`. Use [`Revset::string`] for anything user-supplied.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::from_kind(RevsetKind::Symbol(Cow::Owned(name.into())))
    }

    /// A quoted, escaped string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::from_kind(RevsetKind::StringLiteral(value.into()))
    }

    /// A function call `name(args...)`
    ///
    /// Fails when `name` is blank.
    pub fn function(name: impl Into<String>, args: Vec<Arg>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StrataError::Validation(
                "Function name cannot be blank".to_string(),
            ));
        }
        Ok(Self::from_kind(RevsetKind::Function {
            name: Cow::Owned(name),
            args,
        }))
    }

    /// An operator application
    ///
    /// Fails when the token is blank or the operand count does not fit `kind`.
    pub fn operator(token: impl Into<String>, operands: Vec<Revset>, kind: OperatorKind) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(StrataError::Validation(
                "Operator token cannot be blank".to_string(),
            ));
        }
        check_arity(&token, operands.len(), kind)?;
        Ok(Self::from_kind(RevsetKind::Operator {
            token: Cow::Owned(token),
            operands,
            kind,
        }))
    }

    // Builders below only produce valid shapes, so they skip the checks.

    fn builtin_call(name: &'static str, args: Vec<Arg>) -> Self {
        Self::from_kind(RevsetKind::Function {
            name: Cow::Borrowed(name),
            args,
        })
    }

    fn builtin_op(token: &'static str, operands: Vec<Revset>, kind: OperatorKind) -> Self {
        debug_assert!(check_arity(token, operands.len(), kind).is_ok());
        Self::from_kind(RevsetKind::Operator {
            token: Cow::Borrowed(token),
            operands,
            kind,
        })
    }

    /// `(a&b)`
    pub fn and(a: Revset, b: Revset) -> Self {
        Self::builtin_op("&", vec![a, b], OperatorKind::Infix)
    }

    /// `(a|b|...)`; an empty list yields [`Revset::EMPTY`] and a single entry is returned as is
    pub fn or(revsets: Vec<Revset>) -> Self {
        match revsets.len() {
            0 => Self::EMPTY,
            1 => revsets.into_iter().next().unwrap_or(Self::EMPTY),
            _ => Self::builtin_op("|", revsets, OperatorKind::Infix),
        }
    }

    /// `(a|b)`
    pub fn or2(a: Revset, b: Revset) -> Self {
        Self::or(vec![a, b])
    }

    /// Parents of `revset`: `(x-)`
    pub fn parent_of(revset: Revset) -> Self {
        Self::builtin_op("-", vec![revset], OperatorKind::Postfix)
    }

    /// `(from::to)` with either side optional
    pub fn range_with_root(from: Option<Revset>, to: Option<Revset>) -> Self {
        Self::builtin_op(
            "::",
            vec![from.unwrap_or(Self::EMPTY), to.unwrap_or(Self::EMPTY)],
            OperatorKind::InfixStandalone,
        )
    }

    /// `commit_id(value)`; the id is rendered bare
    pub fn commit_id(value: impl Into<String>) -> Self {
        Self::builtin_call("commit_id", vec![Self::symbol(value).into()])
    }

    /// `description(pattern)`
    pub fn description(pattern: impl Into<Arg>) -> Self {
        Self::builtin_call("description", vec![pattern.into()])
    }

    /// `author("name")`
    pub fn author(name: impl Into<String>) -> Self {
        Self::builtin_call("author", vec![Self::string(name).into()])
    }

    /// `committer("name")`
    pub fn committer(name: impl Into<String>) -> Self {
        Self::builtin_call("committer", vec![Self::string(name).into()])
    }

    /// Commits authored or committed by `name`
    pub fn user(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::or2(Self::author(name.clone()), Self::committer(name))
    }

    /// `files(pattern)`
    pub fn files(pattern: Pattern) -> Self {
        Self::builtin_call("files", vec![pattern.into()])
    }

    /// `committer_date(pattern)`
    pub fn committer_date(pattern: Pattern) -> Self {
        Self::builtin_call("committer_date", vec![pattern.into()])
    }

    /// `bookmarks()`: every commit with a local bookmark
    pub fn bookmarks_all() -> Self {
        Self::builtin_call("bookmarks", Vec::new())
    }
}

fn check_arity(token: &str, count: usize, kind: OperatorKind) -> Result<()> {
    let ok = match kind {
        OperatorKind::Infix => count >= 2,
        OperatorKind::Postfix => count == 1,
        OperatorKind::InfixStandalone => count <= 2,
    };
    if ok {
        Ok(())
    } else {
        Err(StrataError::Validation(format!(
            "{:?} operator '{}' cannot take {} operand(s)",
            kind, token, count
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Render;

    #[test]
    fn test_and_with_parent_of_working_copy() {
        let revset = Revset::and(Revset::commit_id("abc"), Revset::parent_of(Revset::WORKING_COPY));
        assert_eq!(revset.render(), "(commit_id(abc)&(@-))");
    }

    #[test]
    fn test_range_with_root_sides() {
        assert_eq!(Revset::range_with_root(None, None).render(), "(::)");
        assert_eq!(
            Revset::range_with_root(Some(Revset::symbol("a")), None).render(),
            "(a::)"
        );
        assert_eq!(
            Revset::range_with_root(None, Some(Revset::WORKING_COPY)).render(),
            "(::@)"
        );
        assert_eq!(
            Revset::range_with_root(Some(Revset::symbol("a")), Some(Revset::symbol("b"))).render(),
            "(a::b)"
        );
    }

    #[test]
    fn test_or_collapses_small_lists() {
        assert_eq!(Revset::or(vec![]), Revset::EMPTY);
        assert_eq!(Revset::or(vec![Revset::WORKING_COPY]), Revset::WORKING_COPY);
        let revset = Revset::or(vec![
            Revset::symbol("a"),
            Revset::symbol("b"),
            Revset::symbol("c"),
        ]);
        assert_eq!(revset.render(), "(a|b|c)");
    }

    #[test]
    fn test_nested_operators_are_parenthesized() {
        let revset = Revset::and(
            Revset::or2(Revset::symbol("a"), Revset::symbol("b")),
            Revset::parent_of(Revset::parent_of(Revset::WORKING_COPY)),
        );
        assert_eq!(revset.render(), "((a|b)&((@-)-))");
    }

    #[test]
    fn test_user_matches_author_or_committer() {
        assert_eq!(
            Revset::user("Ada \"L\"").render(),
            r#"(author("Ada \"L\"")|committer("Ada \"L\""))"#
        );
    }

    #[test]
    fn test_function_builders() {
        assert_eq!(Revset::ALL.render(), "all()");
        assert_eq!(Revset::bookmarks_all().render(), "bookmarks()");
        assert_eq!(
            Revset::description(Pattern::substring("fix", false)).render(),
            r#"description(substring-i:"fix")"#
        );
        assert_eq!(
            Revset::description(Revset::string("exact")).render(),
            r#"description("exact")"#
        );
        assert_eq!(
            Revset::committer_date(Pattern::date_after("2024-01-01")).render(),
            r#"committer_date(after:"2024-01-01")"#
        );
    }

    #[test]
    fn test_function_rejects_blank_name() {
        assert!(matches!(
            Revset::function("", vec![]),
            Err(StrataError::Validation(_))
        ));
        assert!(matches!(
            Revset::function("  ", vec![]),
            Err(StrataError::Validation(_))
        ));
        let call = Revset::function("heads", vec![Revset::ALL.into()]).unwrap();
        assert_eq!(call.render(), "heads(all())");
    }

    #[test]
    fn test_operator_arity_is_checked_at_construction() {
        let single = vec![Revset::symbol("a")];
        assert!(Revset::operator("&", single.clone(), OperatorKind::Infix).is_err());
        assert!(Revset::operator("-", vec![], OperatorKind::Postfix).is_err());
        assert!(Revset::operator(
            "-",
            vec![Revset::symbol("a"), Revset::symbol("b")],
            OperatorKind::Postfix
        )
        .is_err());
        assert!(Revset::operator(
            "::",
            vec![Revset::EMPTY, Revset::EMPTY, Revset::EMPTY],
            OperatorKind::InfixStandalone
        )
        .is_err());
        assert!(Revset::operator(" ", single.clone(), OperatorKind::Postfix).is_err());

        let ancestors = Revset::operator("::", single, OperatorKind::InfixStandalone).unwrap();
        assert_eq!(ancestors.render(), "(a::)");
        let empty = Revset::operator("::", vec![], OperatorKind::InfixStandalone).unwrap();
        assert_eq!(empty.render(), "(::)");
    }
}
