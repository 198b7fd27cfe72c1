//! Record-to-instance mapping strategies
//!
//! Two of the three measured strategies live here: the [`ReflectiveMapper`]
//! baseline, which re-resolves accessors by name on every call, and the
//! [`compiler`] fast tier, which resolves everything once and bakes the
//! decisions into a compiled procedure. The third strategy, the hand-written
//! static reference mapper, belongs to the benchmark boundary (see
//! [`crate::samples`]) and is only a correctness/performance baseline.

pub mod compiler;

pub use compiler::{CompiledMapper, MapperCompiler};

use crate::descriptor::{Reflect, TypeDescriptor};
use crate::error::{Error, Result};
use crate::record::Record;
use rustc_hash::FxHashMap;

/// Baseline mapping strategy: per-call accessor resolution by field name.
///
/// The only cache a reflective mapper keeps is the accessor lookup index;
/// every `invoke` still walks name → accessor for every field of every
/// record. This is the strategy the compiled tier exists to beat.
pub struct ReflectiveMapper<T: 'static> {
    descriptor: TypeDescriptor<T>,
    /// Accessor lookup cache: field name → position in the field table
    accessor_index: FxHashMap<&'static str, usize>,
}

impl<T: Reflect> ReflectiveMapper<T> {
    /// Build a reflective mapper from a freshly extracted descriptor
    pub fn new() -> Result<Self> {
        Ok(Self::from_descriptor(TypeDescriptor::extract()?))
    }

    /// Build a reflective mapper from an existing descriptor
    pub fn from_descriptor(descriptor: TypeDescriptor<T>) -> Self {
        let accessor_index = descriptor
            .fields()
            .iter()
            .enumerate()
            .map(|(index, spec)| (spec.name, index))
            .collect();
        Self {
            descriptor,
            accessor_index,
        }
    }

    /// Map one record to an instance, resolving each accessor by name
    pub fn invoke(&self, record: &Record) -> Result<T> {
        let mut instance = self.descriptor.construct();
        for spec in self.descriptor.fields() {
            // Name resolution happens here on every call; this lookup is the
            // cost the compiled mapper eliminates.
            let accessor = self
                .accessor_index
                .get(spec.name)
                .map(|&index| &self.descriptor.fields()[index])
                .ok_or_else(|| {
                    Error::internal(format!("accessor index lost field '{}'", spec.name))
                })?;
            let raw = record
                .get(accessor.name)
                .ok_or(Error::missing_field(self.descriptor.type_name(), accessor.name))?;
            let value = accessor.kind.coerce(accessor.name, raw)?;
            (accessor.set)(&mut instance, value)?;
        }
        Ok(instance)
    }

    /// The descriptor this mapper was built from
    pub fn descriptor(&self) -> &TypeDescriptor<T> {
        &self.descriptor
    }
}
