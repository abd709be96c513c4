//! Property validators.
//!
//! A validator inspects the current `Value` of one property and returns a
//! human-readable message on failure. Validators never mutate and never
//! error; failures are collected into `ValidationState::Invalid`.

pub mod len;
pub mod num;
pub mod text;

use crate::value::Value;

///
/// Validator
///

pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value) -> Result<(), String>;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, value: &Value) -> Result<(), String> {
        self(value)
    }
}

///
/// Required
/// Fails on `Null`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Required;

impl Validator for Required {
    fn validate(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            Err("value is required".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_validators() {
        let positive = |v: &Value| match v.as_int() {
            Some(n) if n > 0 => Ok(()),
            _ => Err("must be positive".to_string()),
        };

        assert!(positive.validate(&Value::Int(3)).is_ok());
        assert_eq!(
            positive.validate(&Value::Int(-1)),
            Err("must be positive".to_string())
        );
    }

    #[test]
    fn required_rejects_null_only() {
        assert!(Required.validate(&Value::Null).is_err());
        assert!(Required.validate(&Value::Text(String::new())).is_ok());
    }
}
