//! The specialized mapper compiler
//!
//! Compilation takes a type descriptor and emits one executable procedure
//! that constructs an instance and assigns every field directly. Field-name
//! lookups and accessor dispatch decisions are resolved here, once, and baked
//! into the procedure's captured field program; each invocation pays one map
//! lookup per field plus a direct assignment, never a name-resolution step.
//!
//! Compiled mappers are immutable and `Send + Sync`; the engine caches one
//! per type for the process lifetime.

use crate::descriptor::{Reflect, Setter, TypeDescriptor};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::value::ValueKind;

/// The compiled procedure's shape
type MapFn<T> = Box<dyn Fn(&Record) -> Result<T> + Send + Sync>;

/// One pre-resolved field assignment: everything `invoke` needs, with no
/// name resolution left to do
struct FieldProgram<T> {
    name: &'static str,
    kind: ValueKind,
    set: Setter<T>,
}

/// A cached, type-specific, directly-executable record-to-instance
/// conversion procedure
pub struct CompiledMapper<T> {
    type_name: &'static str,
    field_count: usize,
    run: MapFn<T>,
}

impl<T> CompiledMapper<T> {
    /// Convert one record into an instance of the target type.
    ///
    /// Fails with `MissingField` when the record lacks a required entry and
    /// `TypeMismatch` when a value cannot be coerced; either way no
    /// partially-constructed instance is ever visible to the caller, and the
    /// mapper itself remains valid for subsequent records.
    pub fn invoke(&self, record: &Record) -> Result<T> {
        (self.run)(record)
    }

    /// Identity of the type this mapper produces
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Number of fields the compiled procedure assigns
    pub fn field_count(&self) -> usize {
        self.field_count
    }
}

impl<T> std::fmt::Debug for CompiledMapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledMapper")
            .field("type_name", &self.type_name)
            .field("field_count", &self.field_count)
            .finish()
    }
}

/// Compiler for specialized record mappers
pub struct MapperCompiler;

impl MapperCompiler {
    /// Compile a descriptor into a reusable mapping procedure.
    ///
    /// Side-effect free apart from producing the artifact. The emitted
    /// procedure is behaviorally equivalent to: construct a default
    /// instance, then for each field in descriptor order read the record
    /// entry by name and assign it.
    pub fn compile<T: Reflect>(descriptor: &TypeDescriptor<T>) -> CompiledMapper<T> {
        let type_name = descriptor.type_name();
        let construct = descriptor.constructor();
        let program: Vec<FieldProgram<T>> = descriptor
            .fields()
            .iter()
            .map(|spec| FieldProgram {
                name: spec.name,
                kind: spec.kind,
                set: spec.set,
            })
            .collect();
        let field_count = program.len();

        tracing::debug!(type_name, field_count, "compiled mapper");

        let run: MapFn<T> = Box::new(move |record: &Record| {
            let mut instance = construct();
            for op in &program {
                let raw = record
                    .get(op.name)
                    .ok_or(Error::missing_field(type_name, op.name))?;
                let value = op.kind.coerce(op.name, raw)?;
                (op.set)(&mut instance, value)?;
            }
            Ok(instance)
        });

        CompiledMapper {
            type_name,
            field_count,
            run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record_from_pairs;
    use crate::reflect_record;

    reflect_record! {
        struct Point {
            "X" => x: Int,
            "Y" => y: Int,
        }
    }

    fn compiled_point_mapper() -> CompiledMapper<Point> {
        let descriptor = TypeDescriptor::<Point>::extract().unwrap();
        MapperCompiler::compile(&descriptor)
    }

    #[test]
    fn test_compiled_mapping() {
        let mapper = compiled_point_mapper();
        let record = record_from_pairs([("X", "10"), ("Y", "20")]);
        let point = mapper.invoke(&record).unwrap();
        assert_eq!(point, Point { x: 10, y: 20 });
        assert_eq!(mapper.type_name(), "Point");
        assert_eq!(mapper.field_count(), 2);
    }

    #[test]
    fn test_missing_field_yields_no_instance() {
        let mapper = compiled_point_mapper();
        let record = record_from_pairs([("X", "10")]);
        let err = mapper.invoke(&record).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "Y", .. }));
    }

    #[test]
    fn test_per_record_errors_do_not_invalidate_the_mapper() {
        let mapper = compiled_point_mapper();
        let bad = record_from_pairs([("X", "ten"), ("Y", "20")]);
        assert!(mapper.invoke(&bad).is_err());

        let good = record_from_pairs([("X", "1"), ("Y", "2")]);
        assert_eq!(mapper.invoke(&good).unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn test_compiled_mapper_is_shareable() {
        fn assert_send_sync<V: Send + Sync>(_: &V) {}
        let mapper = compiled_point_mapper();
        assert_send_sync(&mapper);
    }
}
