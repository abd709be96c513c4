use crate::value::Value;
use std::collections::{BTreeMap, BTreeSet};

///
/// ValidationState
///
/// Empty    → nothing validated or changed since construction or the start of `validate()`.
/// Clean    → the last `validate()` found no failures.
/// Dirty    → properties changed since the last validate/undo; never empty.
/// Invalid  → the last `validate()` failed; property → first message, never empty.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ValidationState {
    #[default]
    Empty,
    Clean,
    Dirty(BTreeSet<String>),
    Invalid(BTreeMap<String, String>),
}

impl ValidationState {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        matches!(self, Self::Dirty(_))
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Clean => "clean",
            Self::Dirty(_) => "dirty",
            Self::Invalid(_) => "invalid",
        }
    }
}

///
/// Tracker
/// Per-instance state, undo snapshot, and the restore-pass flag.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Tracker {
    pub(crate) state: ValidationState,
    pub(crate) snapshot: BTreeMap<&'static str, Value>,
    pub(crate) restoring: bool,
}

impl Tracker {
    /// Record a change of `property` whose previous value was `old`.
    /// Any state becomes Dirty; the first old value per property is kept.
    pub(crate) fn observe(&mut self, property: &'static str, old: &Value) {
        match &mut self.state {
            ValidationState::Dirty(dirty) => {
                dirty.insert(property.to_string());
            }
            state => *state = ValidationState::Dirty(BTreeSet::from([property.to_string()])),
        }

        if !self.restoring {
            self.snapshot
                .entry(property)
                .or_insert_with(|| old.clone());
        }
    }
}
