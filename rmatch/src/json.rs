//! Recovers JSON values embedded in free-form model answers.

use serde_json::{Deserializer, Map, Value};

/// Every well-formed JSON object or array in `text`, left to right.
///
/// Scanning resumes after the end of each value found, so nested values are
/// reported only as part of their parent.
pub fn extract_json_objects(text: &str) -> Vec<Value> {
    let mut found = Vec::new();
    let mut offset = 0;

    while let Some(relative) = text[offset..].find(['{', '[']) {
        let start = offset + relative;
        let mut stream = Deserializer::from_str(&text[start..]).into_iter::<Value>();

        match stream.next() {
            Some(Ok(value)) => {
                offset = start + stream.byte_offset();
                found.push(value);
            }
            _ => offset = start + 1,
        }
    }

    found
}

/// The first JSON object in `text`; arrays are skipped.
pub fn first_json_object(text: &str) -> Option<Map<String, Value>> {
    extract_json_objects(text)
        .into_iter()
        .find_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_objects_embedded_in_prose() {
        let text = r#"Sure! Here you go: {"score": 80, "explanation": "solid"} Hope that helps."#;

        assert_eq!(
            extract_json_objects(text),
            vec![json!({"score": 80, "explanation": "solid"})]
        );
    }

    #[test]
    fn nested_values_are_not_reported_twice() {
        let text = r#"{"languages": ["German", "English"], "travel": []} and [1, 2]"#;

        let values = extract_json_objects(text);

        assert_eq!(values.len(), 2);
        assert_eq!(values[1], json!([1, 2]));
    }

    #[test]
    fn stray_braces_are_skipped() {
        let text = r#"{ not json } then {"ok": true}"#;

        assert_eq!(extract_json_objects(text), vec![json!({"ok": true})]);
    }

    #[test]
    fn first_object_skips_leading_arrays() {
        let text = r#"["a", "b"] {"first": 1} {"second": 2}"#;

        let object = first_json_object(text).expect("an object should be found");

        assert_eq!(Value::Object(object), json!({"first": 1}));
    }

    #[test]
    fn no_object_yields_none() {
        assert!(first_json_object("no structured data here").is_none());
        assert!(first_json_object("[1, 2, 3]").is_none());
    }
}
