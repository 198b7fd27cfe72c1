//! Per-property mutation-observer callback lists
//!
//! A registry keeps two ordered callback sequences per property name:
//! before-set and after-set. Registration appends; firing walks the sequence
//! in registration order and stops at the first failing callback, whose
//! error propagates unwrapped to the caller of the firing method.
//!
//! Registration is a setup-phase activity. Registering while a fire is in
//! progress is undefined behavior and out of scope.

use crate::error::Result;
use crate::value::FieldValue;
use rustc_hash::FxHashMap;

/// A mutation observer: receives the old and new values of an assignment
pub type SetObserver = Box<dyn Fn(&FieldValue, &FieldValue) -> Result<()>>;

/// Ordered per-property before/after mutation observer lists
#[derive(Default)]
pub struct CallbackRegistry {
    before_set: FxHashMap<&'static str, Vec<SetObserver>>,
    after_set: FxHashMap<&'static str, Vec<SetObserver>>,
}

impl CallbackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a before-set observer for a property, preserving registration
    /// order
    pub fn register_before_set(&mut self, property: &'static str, callback: SetObserver) {
        self.before_set.entry(property).or_default().push(callback);
    }

    /// Append an after-set observer for a property, preserving registration
    /// order
    pub fn register_after_set(&mut self, property: &'static str, callback: SetObserver) {
        self.after_set.entry(property).or_default().push(callback);
    }

    /// Invoke every before-set observer for a property in registration
    /// order. No-op when none are registered. A failing observer aborts the
    /// remainder of the sequence.
    pub fn fire_before_set(
        &self,
        property: &str,
        old: &FieldValue,
        new: &FieldValue,
    ) -> Result<()> {
        if let Some(callbacks) = self.before_set.get(property) {
            for callback in callbacks {
                callback(old, new)?;
            }
        }
        Ok(())
    }

    /// Invoke every after-set observer for a property in registration order.
    /// No-op when none are registered.
    pub fn fire_after_set(
        &self,
        property: &str,
        old: &FieldValue,
        new: &FieldValue,
    ) -> Result<()> {
        if let Some(callbacks) = self.after_set.get(property) {
            for callback in callbacks {
                callback(old, new)?;
            }
        }
        Ok(())
    }

    /// Number of observers registered for a property across both phases
    pub fn observer_count(&self, property: &str) -> usize {
        let before = self.before_set.get(property).map_or(0, Vec::len);
        let after = self.after_set.get(property).map_or(0, Vec::len);
        before + after
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("before_set_properties", &self.before_set.len())
            .field("after_set_properties", &self.after_set.len())
            .finish()
    }
}
