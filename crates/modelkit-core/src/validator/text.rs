use crate::{validator::Validator, value::Value};

///
/// NotEmpty
/// Text must contain at least one non-whitespace character.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NotEmpty;

impl Validator for NotEmpty {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::Text(s) if s.trim().is_empty() => Err("text must not be empty".to_string()),
            Value::Text(_) | Value::Null => Ok(()),
            other => Err(format!("expected text, found {}", other.label())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_empty() {
        assert!(NotEmpty.validate(&Value::Text("  ".into())).is_err());
        assert!(NotEmpty.validate(&Value::Text("x".into())).is_ok());
        assert!(NotEmpty.validate(&Value::Int(1)).is_err());
    }
}
