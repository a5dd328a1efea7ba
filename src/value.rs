//! Helpers for the scalar values carried by templates and documents.
use serde_yaml::Value;

/// Render a scalar as text; sequences, mappings, and null have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// An answer counts as empty when it is absent, null, or blank text.
pub fn is_empty_answer(answer: Option<&Value>) -> bool {
    match answer {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

/// Turn `"true"`/`"false"` (any case) into booleans; everything else passes through.
pub fn coerce_answer(value: Value) -> Value {
    if let Value::String(text) = &value {
        if text.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
    }
    value
}

/// Give a typed reply the scalar type of the field's default.
///
/// Only number and boolean defaults convert; a reply that does not parse as
/// the same kind stays text.
pub fn typed_reply(reply: String, like: Option<&Value>) -> Value {
    let same_kind = |parsed: &Value| match like {
        Some(Value::Number(_)) => parsed.is_number(),
        Some(Value::Bool(_)) => parsed.is_bool(),
        _ => false,
    };
    match serde_yaml::from_str::<Value>(&reply) {
        Ok(parsed) if same_kind(&parsed) => parsed,
        _ => Value::String(reply),
    }
}

/// Display form used in prompts and update messages.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => scalar_text(other).unwrap_or_else(|| {
            serde_yaml::to_string(other)
                .map(|text| text.trim_end().to_string())
                .unwrap_or_default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_answer_maps_boolean_words_case_insensitively() {
        assert_eq!(coerce_answer(Value::from("TRUE")), Value::Bool(true));
        assert_eq!(coerce_answer(Value::from("False")), Value::Bool(false));
        assert_eq!(coerce_answer(Value::from("yes")), Value::from("yes"));
        assert_eq!(coerce_answer(Value::from(115200)), Value::from(115200));
    }

    #[test]
    fn blank_text_and_null_are_empty_answers() {
        assert!(is_empty_answer(None));
        assert!(is_empty_answer(Some(&Value::Null)));
        assert!(is_empty_answer(Some(&Value::from("  "))));
        assert!(!is_empty_answer(Some(&Value::Bool(false))));
        assert!(!is_empty_answer(Some(&Value::from("0"))));
    }

    #[test]
    fn typed_reply_follows_default_kind() {
        let baud = Value::from(115200);
        assert_eq!(typed_reply("921600".to_string(), Some(&baud)), Value::from(921600));
        assert_eq!(typed_reply("fast".to_string(), Some(&baud)), Value::from("fast"));
        assert_eq!(typed_reply("921600".to_string(), Some(&Value::from("uart.log"))), Value::from("921600"));
        assert_eq!(typed_reply("42".to_string(), None), Value::from("42"));
        assert_eq!(typed_reply("true".to_string(), Some(&Value::Bool(false))), Value::Bool(true));
    }

    #[test]
    fn display_value_capitalizes_booleans() {
        assert_eq!(display_value(&Value::Bool(true)), "True");
        assert_eq!(display_value(&Value::from("/dev/ttyUSB0")), "/dev/ttyUSB0");
        assert_eq!(display_value(&Value::from(9600)), "9600");
    }
}
