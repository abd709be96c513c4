use crate::{validator::Validator, value::Value};

// Length is characters for text and items for lists and records.

fn length(value: &Value) -> Result<Option<usize>, String> {
    match value {
        Value::Null => Ok(None),
        other => other
            .len()
            .map(Some)
            .ok_or_else(|| format!("{} has no length", other.label())),
    }
}

///
/// Equal
///

#[derive(Clone, Copy, Debug)]
pub struct Equal {
    target: usize,
}

impl Equal {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl Validator for Equal {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match length(value)? {
            Some(len) if len != self.target => Err(format!(
                "length ({len}) is not equal to {}",
                self.target
            )),
            _ => Ok(()),
        }
    }
}

///
/// Min
///

#[derive(Clone, Copy, Debug)]
pub struct Min {
    target: usize,
}

impl Min {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl Validator for Min {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match length(value)? {
            Some(len) if len < self.target => Err(format!(
                "length ({len}) is lower than minimum of {}",
                self.target
            )),
            _ => Ok(()),
        }
    }
}

///
/// Max
///

#[derive(Clone, Copy, Debug)]
pub struct Max {
    target: usize,
}

impl Max {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl Validator for Max {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match length(value)? {
            Some(len) if len > self.target => Err(format!(
                "length ({len}) is greater than maximum of {}",
                self.target
            )),
            _ => Ok(()),
        }
    }
}
