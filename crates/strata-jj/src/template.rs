//! Builders for jj output templates
//!
//! The templates assembled here make jj print one JSON object per item,
//! newline-terminated. Field values are wrapped in jj's own `json(...)`
//! so jj does the value encoding; these helpers only stitch key literals
//! and `++` concatenation together.

/// Wrap a template expression in `json(...)`
pub fn json(expression: &str) -> String {
    format!("json({})", expression)
}

/// A JSON array built by mapping every element of a list-typed expression
///
/// `transform` must yield a serialized JSON value per element, e.g.
/// `|p| json(p.commit_id())`.
pub fn mapped_list(target: &str, transform: &str) -> String {
    format!(
        "\"[\" ++ {}.map({}).join(\",\") ++ \"]\"",
        target, transform
    )
}

/// Build a template that emits `{"key":<value>,...}` plus a newline per item
///
/// Keys are emitted as-is into both a jj string literal and a JSON key, so
/// they must be plain identifiers. Each value must already be a template
/// expression producing JSON (see [`json`] and [`mapped_list`]).
pub fn serializable_template<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts = vec!["\"{\"".to_string()];
    for (i, (key, expression)) in fields.into_iter().enumerate() {
        if i > 0 {
            parts.push("\",\"".to_string());
        }
        parts.push(format!("\"\\\"{}\\\":\"", key));
        parts.push(expression);
    }
    parts.push("\"}\"".to_string());
    parts.push("\"\\n\"".to_string());
    parts.join(" ++ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_wraps_expression() {
        assert_eq!(json("description.first_line()"), "json(description.first_line())");
    }

    #[test]
    fn test_mapped_list_creates_array_expression() {
        assert_eq!(
            mapped_list("parents", "|p| json(p)"),
            "\"[\" ++ parents.map(|p| json(p)).join(\",\") ++ \"]\""
        );
    }

    #[test]
    fn test_serializable_template_shape() {
        let template = serializable_template([("a", json("a")), ("b", json("b"))]);
        assert_eq!(
            template,
            r#""{" ++ "\"a\":" ++ json(a) ++ "," ++ "\"b\":" ++ json(b) ++ "}" ++ "\n""#
        );
    }

    #[test]
    fn test_serializable_template_without_fields() {
        assert_eq!(
            serializable_template(std::iter::empty()),
            r#""{" ++ "}" ++ "\n""#
        );
    }
}
