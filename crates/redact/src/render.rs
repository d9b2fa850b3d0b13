//! Parse and render.
//!
//! Placeholders by kind:
//!
//! | node    | rendered as                       |
//! |---------|-----------------------------------|
//! | null    | `null`                            |
//! | boolean | `true` / `false` (value kept)     |
//! | number  | `0`, whatever its magnitude       |
//! | string  | `""`                              |
//! | object  | `{"k": <child>, ...}` every member, in document order |
//! | array   | `[<child>, ...]`, same length     |
//!
//! Object keys are structural metadata and are kept; they are re-escaped as JSON
//! strings so the output always parses back to the same shape.
//!
//! Parsing stops at 128 levels of nesting, which bounds stack use while the tree
//! is built and walked. A deeper body is rejected like malformed input.

use serde_json::Value;

use crate::error::RedactResult;
use crate::tree::RedactionTree;

/// Parse raw body bytes into a tree.
pub fn parse(bytes: &[u8]) -> RedactResult<RedactionTree> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Render a tree with every scalar value replaced by its placeholder.
pub fn render(tree: &RedactionTree) -> String {
    let mut out = String::new();
    render_into(tree, &mut out);
    out
}

/// Parse and render in one step.
pub fn redact(bytes: &[u8]) -> RedactResult<String> {
    parse(bytes).map(|tree| render(&tree))
}

fn render_into(node: &RedactionTree, out: &mut String) {
    match node {
        RedactionTree::Null => out.push_str("null"),
        RedactionTree::Bool(true) => out.push_str("true"),
        RedactionTree::Bool(false) => out.push_str("false"),
        RedactionTree::Number => out.push('0'),
        RedactionTree::String => out.push_str("\"\""),
        RedactionTree::Object(members) => {
            out.push('{');
            for (i, (key, child)) in members.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push_str(": ");
                render_into(child, out);
            }
            out.push('}');
        }
        RedactionTree::Array(items) => {
            out.push('[');
            for (i, child) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_into(child, out);
            }
            out.push(']');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedactError;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn flat_object() {
        assert_eq!(
            redact(br#"{"a":1,"name":"bob"}"#).unwrap(),
            r#"{"a": 0, "name": ""}"#
        );
    }

    #[test]
    fn key_order_is_document_order() {
        assert_eq!(
            redact(br#"{"zeta":1.5,"alpha":-3,"mid":"x"}"#).unwrap(),
            r#"{"zeta": 0, "alpha": 0, "mid": ""}"#
        );
    }

    #[test]
    fn nested_structures_keep_shape() {
        let body = br#"{"user":{"id":42,"tags":["a","b","c"],"active":true},"items":[{"q":1},{"q":2}],"next":null}"#;
        assert_eq!(
            redact(body).unwrap(),
            r#"{"user": {"id": 0, "tags": ["", "", ""], "active": true}, "items": [{"q": 0}, {"q": 0}], "next": null}"#
        );
    }

    #[test]
    fn booleans_keep_their_value() {
        assert_eq!(redact(b"[true, false, 0, \"t\"]").unwrap(), "[true, false, 0, \"\"]");
    }

    #[test]
    fn scalar_documents() {
        assert_eq!(redact(b"\"secret\"").unwrap(), "\"\"");
        assert_eq!(redact(b"123456789").unwrap(), "0");
        assert_eq!(redact(b"null").unwrap(), "null");
        assert_eq!(redact(b"false").unwrap(), "false");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(redact(b"{}").unwrap(), "{}");
        assert_eq!(redact(b"[]").unwrap(), "[]");
        assert_eq!(redact(br#"{"a":[],"b":{}}"#).unwrap(), r#"{"a": [], "b": {}}"#);
    }

    #[test]
    fn keys_are_escaped_as_json_strings() {
        let out = redact(br#"{"say \"hi\"":1}"#).unwrap();
        assert_eq!(out, r#"{"say \"hi\"": 0}"#);
        assert!(serde_json::from_str::<Value>(&out).is_ok());
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(redact(b"{\"a\":"), Err(RedactError::InvalidJson(_))));
        assert!(matches!(redact(b"name=bob"), Err(RedactError::InvalidJson(_))));
    }

    #[test]
    fn numbers_of_any_magnitude_become_zero() {
        assert_eq!(redact(b"{\"n\":1e400}").unwrap(), r#"{"n": 0}"#);
        assert_eq!(
            redact(b"[-123456789012345678901234567890, 0.1e-999, 18446744073709551616]").unwrap(),
            "[0, 0, 0]"
        );
    }

    #[test]
    fn repeated_members_are_all_kept_in_place() {
        assert_eq!(
            redact(br#"{"a":1,"b":2,"a":"x"}"#).unwrap(),
            r#"{"a": 0, "b": 0, "a": ""}"#
        );
        assert_eq!(
            parse(br#"{"a":true,"a":false}"#).unwrap(),
            RedactionTree::Object(vec![
                ("a".into(), RedactionTree::Bool(true)),
                ("a".into(), RedactionTree::Bool(false)),
            ])
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));

        let shallow = nested(100);
        assert_eq!(redact(shallow.as_bytes()).unwrap(), shallow);
        assert!(matches!(
            redact(nested(200).as_bytes()),
            Err(RedactError::InvalidJson(_))
        ));
    }

    /// Same kinds, same key order, same array lengths; booleans equal.
    fn same_shape(original: &Value, tree: &RedactionTree) -> bool {
        match (original, tree) {
            (Value::Null, RedactionTree::Null) => true,
            (Value::Bool(a), RedactionTree::Bool(b)) => a == b,
            (Value::Number(_), RedactionTree::Number) => true,
            (Value::String(_), RedactionTree::String) => true,
            (Value::Array(a), RedactionTree::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
            }
            (Value::Object(a), RedactionTree::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && same_shape(va, vb))
            }
            _ => false,
        }
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            (-1.0e12f64..1.0e12f64).prop_map(Value::from),
            "[a-zA-Z0-9 @.]{0,16}".prop_map(Value::from),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::vec(("[a-z_]{1,8}", inner), 0..8)
                    .prop_map(|members| Value::Object(members.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: output parses back to a document with the same shape.
        #[test]
        fn shape_is_preserved(doc in arb_json()) {
            let out = redact(doc.to_string().as_bytes()).unwrap();
            let reparsed = parse(out.as_bytes()).unwrap();
            prop_assert!(same_shape(&doc, &reparsed), "{} -> {}", doc, out);
        }

        /// Property: redacting redacted output changes nothing.
        #[test]
        fn rendering_is_a_fixed_point(doc in arb_json()) {
            let tree = parse(doc.to_string().as_bytes()).unwrap();
            let once = render(&tree);
            prop_assert_eq!(parse(once.as_bytes()).unwrap(), tree);
            prop_assert_eq!(redact(once.as_bytes()).unwrap(), once);
        }

        /// Property: no string value survives redaction.
        #[test]
        fn string_values_do_not_leak(secret in "[a-z]{6,12}", key in "[A-Z]{1,4}") {
            let mut members = serde_json::Map::new();
            members.insert(key.clone(), Value::from(secret.clone()));
            members.insert("list".into(), Value::Array(vec![Value::from(secret.clone())]));
            let out = redact(Value::Object(members).to_string().as_bytes()).unwrap();
            prop_assert!(!out.contains(&secret));
            prop_assert!(out.contains(&key));
        }
    }
}
