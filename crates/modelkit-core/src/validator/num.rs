use crate::{validator::Validator, value::Value};

// Numeric validators compare on the lossy f64 view. Null passes; pair with
// `Required` to reject it.

fn numeric(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        other => other
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("expected a number, found {}", other.label())),
    }
}

fn numeric_target(value: impl Into<Value>, name: &str) -> Result<f64, String> {
    let value = value.into();
    value
        .as_f64()
        .ok_or_else(|| format!("{name} target must be numeric, found {}", value.label()))
}

macro_rules! comparison {
    ($name:ident, $op:tt, $symbol:literal) => {
        #[doc = concat!("Passes when the value is `", $symbol, "` the target.")]
        #[derive(Clone, Debug)]
        pub struct $name {
            target: Result<f64, String>,
        }

        impl $name {
            pub fn new(target: impl Into<Value>) -> Self {
                Self {
                    target: numeric_target(target, stringify!($name)),
                }
            }
        }

        impl Validator for $name {
            fn validate(&self, value: &Value) -> Result<(), String> {
                let target = self.target.clone()?;
                let Some(v) = numeric(value)? else {
                    return Ok(());
                };

                if v $op target {
                    Ok(())
                } else {
                    Err(format!("{v} must be {} {target}", $symbol))
                }
            }
        }
    };
}

comparison!(Lt, <, "<");
comparison!(Lte, <=, "<=");
comparison!(Gt, >, ">");
comparison!(Gte, >=, ">=");

///
/// Range
/// Inclusive on both ends.
///

#[derive(Clone, Debug)]
pub struct Range {
    bounds: Result<(f64, f64), String>,
}

impl Range {
    pub fn new(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        let bounds = numeric_target(min, "Range").and_then(|min| {
            let max = numeric_target(max, "Range")?;
            if min <= max {
                Ok((min, max))
            } else {
                Err(format!("range requires min <= max, got {min} > {max}"))
            }
        });

        Self { bounds }
    }
}

impl Validator for Range {
    fn validate(&self, value: &Value) -> Result<(), String> {
        let (min, max) = self.bounds.clone()?;
        let Some(v) = numeric(value)? else {
            return Ok(());
        };

        if v < min || v > max {
            Err(format!("{v} must be between {min} and {max}"))
        } else {
            Ok(())
        }
    }
}
