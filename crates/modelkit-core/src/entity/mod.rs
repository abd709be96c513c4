//! Tracked entities and the validation/undo state machine.
//!
//! An `Entity<M>` owns a record plus its tracker. Reads go through `Deref`;
//! every write goes through `set`, `modify`, or `merge`, which is where
//! changes are observed.

mod state;


pub use state::ValidationState;

use crate::{
    Document,
    catalog::catalog_for,
    config::config_for,
    error::FieldError,
    mapper::{self, Assignment, DecodeError, EncodeError},
    obs::sink::{self, MapperEvent},
    traits::Model,
    value::Value,
};
use derive_more::Deref;
use serde_json::Value as JsonValue;
use state::Tracker;
use std::collections::{BTreeMap, BTreeSet};

static NO_PROPERTIES: BTreeSet<String> = BTreeSet::new();
static NO_ERRORS: BTreeMap<String, String> = BTreeMap::new();

///
/// Entity
///

#[derive(Clone, Debug, Deref)]
pub struct Entity<M> {
    #[deref]
    record: M,
    tracker: Tracker,
}

impl<M: Model> Entity<M> {
    /// New entity holding default property values, in state `Empty`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_record(M::default())
    }

    /// Start tracking an existing record; no change is observed.
    #[must_use]
    pub fn from_record(record: M) -> Self {
        Self {
            record,
            tracker: Tracker::default(),
        }
    }

    #[must_use]
    pub const fn record(&self) -> &M {
        &self.record
    }

    #[must_use]
    pub fn into_record(self) -> M {
        self.record
    }

    #[must_use]
    pub const fn state(&self) -> &ValidationState {
        &self.tracker.state
    }

    /// Properties changed in the current Dirty episode; empty in any other state.
    #[must_use]
    pub fn dirty_properties(&self) -> &BTreeSet<String> {
        match &self.tracker.state {
            ValidationState::Dirty(dirty) => dirty,
            _ => &NO_PROPERTIES,
        }
    }

    /// Failures from the last `validate()`; empty unless Invalid.
    #[must_use]
    pub fn validation_errors(&self) -> &BTreeMap<String, String> {
        match &self.tracker.state {
            ValidationState::Invalid(errors) => errors,
            _ => &NO_ERRORS,
        }
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.tracker.state.is_dirty()
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.tracker.state.is_clean()
    }

    /// Values recorded before the first change of each property.
    #[must_use]
    pub const fn undo_snapshot(&self) -> &BTreeMap<&'static str, Value> {
        &self.tracker.snapshot
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<Value> {
        self.record.get_value(property)
    }

    /// Assign one property. Returns whether a change was observed.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> Result<bool, FieldError> {
        let catalog = catalog_for::<M>();
        let name = catalog
            .field(property)
            .map(|field| field.name)
            .ok_or_else(|| FieldError::unknown(M::PATH, property))?;

        self.assign(name, value.into())
    }

    /// Mutate the record directly, then observe every property that differs,
    /// in declaration order. Returns the changed property names.
    pub fn modify(&mut self, f: impl FnOnce(&mut M)) -> Vec<&'static str> {
        let catalog = catalog_for::<M>();
        let before: Vec<Value> = catalog
            .names()
            .map(|name| self.current(name))
            .collect();

        f(&mut self.record);

        let mut changed = Vec::new();
        for (name, old) in catalog.names().zip(before) {
            let new = self.current(name);
            if old != new {
                self.observe_change(name, &old, &new);
                changed.push(name);
            }
        }

        changed
    }

    /// Apply a wire document onto this entity through the mapper, observing
    /// each assignment. Returns the changed property names.
    ///
    /// All-or-nothing: every assignment is checked before any is applied, so
    /// a failure leaves the record, state, and snapshot untouched.
    pub fn merge(&mut self, json: &JsonValue) -> Result<Vec<&'static str>, DecodeError> {
        let document = mapper::as_document::<M>(json)?;
        let assignments = mapper::decode_assignments::<M>(document.clone())?;

        let mut scratch = M::default();
        for assignment in &assignments {
            scratch
                .set_value(assignment.property, assignment.value.clone())
                .map_err(|source| DecodeError::Assignment {
                    model: M::PATH,
                    key: assignment.key.clone(),
                    source,
                })?;
        }

        let mut changed = Vec::new();
        for Assignment {
            key,
            property,
            value,
        } in assignments
        {
            let observed = self
                .assign(property, value)
                .map_err(|source| DecodeError::Assignment {
                    model: M::PATH,
                    key,
                    source,
                })?;

            if observed {
                changed.push(property);
            }
        }

        Ok(changed)
    }

    /// Run every registered validator in registration order.
    ///
    /// The first failure per property is kept. Zero failures moves to Clean
    /// and clears the undo snapshot; otherwise Invalid.
    pub fn validate(&mut self) -> &ValidationState {
        let config = config_for::<M>();
        self.tracker.state = ValidationState::Empty;

        let mut errors = BTreeMap::new();
        for (property, validator) in config.validators() {
            let Some(value) = self.record.get_value(property) else {
                tracing::trace!(model = M::PATH, property, "validator skipped: no such property");
                continue;
            };

            if let Err(message) = validator.validate(&value) {
                errors.entry(property.to_string()).or_insert(message);
            }
        }

        sink::record(MapperEvent::Validate {
            model_path: M::PATH,
            failures: u64::try_from(errors.len()).unwrap_or(u64::MAX),
        });

        if errors.is_empty() {
            self.tracker.snapshot.clear();
            self.tracker.state = ValidationState::Clean;
        } else {
            tracing::debug!(model = M::PATH, ?errors, "validation failed");
            self.tracker.state = ValidationState::Invalid(errors);
        }

        &self.tracker.state
    }

    /// Restore every snapshotted property, re-validate, and clear the snapshot.
    /// Ends in Clean or Invalid.
    ///
    /// Restores are checked first; if any would be rejected nothing is
    /// restored and the snapshot is kept.
    pub fn undo(&mut self) -> Result<&ValidationState, FieldError> {
        let mut scratch = M::default();
        for (property, old) in &self.tracker.snapshot {
            scratch.set_value(property, old.clone())?;
        }

        let snapshot = std::mem::take(&mut self.tracker.snapshot);
        let restored = u64::try_from(snapshot.len()).unwrap_or(u64::MAX);

        self.tracker.restoring = true;
        let outcome = snapshot
            .into_iter()
            .try_for_each(|(property, old)| self.assign(property, old).map(|_| ()));
        self.tracker.restoring = false;
        outcome?;

        sink::record(MapperEvent::Undo {
            model_path: M::PATH,
            restored,
        });
        tracing::debug!(model = M::PATH, restored, "undo applied");

        self.validate();
        self.tracker.snapshot.clear();

        Ok(&self.tracker.state)
    }

    /// Encode the current record; tracking state is not part of the wire form.
    pub fn encode(&self) -> Result<Document, EncodeError> {
        mapper::encode(&self.record)
    }

    //
    // change observation
    //

    fn current(&self, property: &str) -> Value {
        self.record.get_value(property).unwrap_or(Value::Null)
    }

    fn assign(&mut self, property: &'static str, value: Value) -> Result<bool, FieldError> {
        let old = self.current(property);
        self.record.set_value(property, value)?;
        let new = self.current(property);

        if old == new {
            return Ok(false);
        }

        self.observe_change(property, &old, &new);

        Ok(true)
    }

    fn observe_change(&mut self, property: &'static str, old: &Value, new: &Value) {
        tracing::trace!(model = M::PATH, property, %old, %new, "property changed");
        self.tracker.observe(property, old);
        self.record.on_property_changed(property, old, new);
    }
}

impl<M: Model> Default for Entity<M> {
    fn default() -> Self {
        Self::new()
    }
}
