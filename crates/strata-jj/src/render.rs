//! Rendering of expression trees into jj's concrete syntax
//!
//! Every revset operator node is wrapped in parentheses, so nesting never
//! depends on jj's precedence table. Pattern nodes are emitted without
//! parentheses.

use crate::pattern::{Pattern, PatternKind, PatternOperatorKind};
use crate::revset::{Arg, OperatorKind, Revset, RevsetKind};

/// Anything that can be rendered into jj expression syntax
pub trait Render {
    /// Append the rendered form to `out`
    fn render_into(&self, out: &mut String);

    fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

/// Escape text for use inside a double-quoted jj string literal
///
/// Backslashes are doubled before quotes are escaped, so the backslashes
/// introduced for quotes are not escaped again.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn push_quoted(out: &mut String, text: &str) {
    out.push('"');
    out.push_str(&escape(text));
    out.push('"');
}

fn push_joined<T: Render>(out: &mut String, items: &[T], separator: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        item.render_into(out);
    }
}

impl Render for Revset {
    fn render_into(&self, out: &mut String) {
        match &self.kind {
            RevsetKind::Symbol(name) => out.push_str(name),
            RevsetKind::StringLiteral(value) => push_quoted(out, value),
            RevsetKind::Function { name, args } => {
                out.push_str(name);
                out.push('(');
                push_joined(out, args, ", ");
                out.push(')');
            }
            RevsetKind::Operator {
                token,
                operands,
                kind,
            } => {
                out.push('(');
                match kind {
                    OperatorKind::Postfix => {
                        if let Some(operand) = operands.first() {
                            operand.render_into(out);
                        }
                        out.push_str(token);
                    }
                    OperatorKind::InfixStandalone => {
                        if let Some(left) = operands.first() {
                            left.render_into(out);
                        }
                        out.push_str(token);
                        if let Some(right) = operands.get(1) {
                            right.render_into(out);
                        }
                    }
                    OperatorKind::Infix => push_joined(out, operands, token),
                }
                out.push(')');
            }
        }
    }
}

impl Render for Pattern {
    fn render_into(&self, out: &mut String) {
        match &self.kind {
            PatternKind::Expression {
                ty,
                text,
                case_sensitive,
            } => {
                out.push_str(ty.as_str());
                if !case_sensitive {
                    out.push_str("-i");
                }
                out.push(':');
                push_quoted(out, text);
            }
            PatternKind::Operator {
                token,
                kind,
                operands,
            } => match kind {
                PatternOperatorKind::Infix => push_joined(out, operands, &format!(" {} ", token)),
                PatternOperatorKind::Prefix => {
                    out.push_str(token);
                    if let Some(operand) = operands.first() {
                        operand.render_into(out);
                    }
                }
            },
        }
    }
}

impl Render for Arg {
    fn render_into(&self, out: &mut String) {
        match self {
            Arg::Revset(revset) => revset.render_into(out),
            Arg::Pattern(pattern) => pattern.render_into(out),
        }
    }
}

impl std::fmt::Display for Revset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
