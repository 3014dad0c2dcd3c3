use serde_json::Value;

/// A raw command value as supplied by the event source, resolved into one
/// shape at the boundary so the rest of the pipeline can dispatch on a tag
/// instead of re-inspecting JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCommand {
    /// No command was supplied at all.
    Absent,
    /// Free text, possibly a JSON descriptor embedded in a string.
    Text(String),
    /// A structured descriptor carrying a string `name` field.
    Structured(String),
    /// Anything else; its JSON serialization is treated as the command name.
    Other(Value),
}

impl RawCommand {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => RawCommand::Absent,
            Value::String(text) => RawCommand::Text(text.clone()),
            Value::Object(fields) => match fields.get("name") {
                Some(Value::String(name)) => RawCommand::Structured(name.clone()),
                _ => RawCommand::Other(value.clone()),
            },
            _ => RawCommand::Other(value.clone()),
        }
    }

    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            None => RawCommand::Absent,
            Some(text) => RawCommand::Text(text.to_string()),
        }
    }
}

/// Reduce a raw command value to its canonical name.
///
/// Every terminal case funnels through `canonical`, so "smoke", "/smoke",
/// " /SMOKE " and `{"name":"/Smoke"}` all come out as `"smoke"`. An empty
/// string means "no command". Any non-empty canonical text is accepted as a
/// command name; no further validation happens here.
pub fn normalize(raw: &RawCommand) -> String {
    match raw {
        RawCommand::Absent => String::new(),
        RawCommand::Structured(name) => canonical(name),
        RawCommand::Text(text) => {
            let trimmed = text.trim();
            if let Ok(embedded) = serde_json::from_str::<Value>(trimmed) {
                if let RawCommand::Structured(name) = RawCommand::from_value(&embedded) {
                    return canonical(&name);
                }
            }
            canonical(trimmed)
        }
        RawCommand::Other(value) => canonical(&value.to_string()),
    }
}

/// The one normalization rule: drop leading whitespace and slashes, trim the
/// tail, lowercase. Stripping whitespace and slashes together keeps the
/// result stable under renormalization.
fn canonical(text: &str) -> String {
    text.trim_start_matches(|c: char| c == '/' || c.is_whitespace())
        .trim_end()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_absent_is_empty() {
        assert_eq!(normalize(&RawCommand::Absent), "");
        assert_eq!(normalize(&RawCommand::from_input(None)), "");
    }

    #[test]
    fn test_normalize_equivalent_spellings() {
        for raw in [
            RawCommand::Text("/Smoke".to_string()),
            RawCommand::Text(" smoke ".to_string()),
            RawCommand::Text(" /SMOKE ".to_string()),
            RawCommand::Text(r#"{"name":"smoke"}"#.to_string()),
            RawCommand::Structured("/SMOKE".to_string()),
        ] {
            assert_eq!(normalize(&raw), "smoke", "raw: {raw:?}");
        }
    }

    #[test]
    fn test_normalize_structured_from_value() {
        let raw = RawCommand::from_value(&json!({"name": "/Smoke", "args": [1]}));
        assert_eq!(raw, RawCommand::Structured("/Smoke".to_string()));
        assert_eq!(normalize(&raw), "smoke");
    }

    #[test]
    fn test_normalize_object_without_name_stringifies() {
        let raw = RawCommand::from_value(&json!({"verb": "smoke"}));
        assert!(matches!(raw, RawCommand::Other(_)));
        assert_eq!(normalize(&raw), r#"{"verb":"smoke"}"#);
    }

    #[test]
    fn test_normalize_number_stringifies() {
        assert_eq!(normalize(&RawCommand::from_value(&json!(42))), "42");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            RawCommand::Text("  // Smoke ".to_string()),
            RawCommand::Text("/ / smoke".to_string()),
            RawCommand::Text(r#"{"name":"/RUN-Tests"}"#.to_string()),
            RawCommand::Other(json!(["a", "b"])),
        ] {
            let once = normalize(&raw);
            let twice = normalize(&RawCommand::Text(once.clone()));
            assert_eq!(once, twice, "raw: {raw:?}");
        }
    }

    #[test]
    fn test_normalize_permissive_on_malformed_json() {
        // A JSON-looking string that fails to parse is treated as a literal
        // command name.
        assert_eq!(
            normalize(&RawCommand::Text(r#"{"name": smoke"#.to_string())),
            r#"{"name": smoke"#.to_lowercase()
        );
    }
}
