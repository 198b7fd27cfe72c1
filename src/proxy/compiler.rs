//! The specialized proxy compiler
//!
//! Where the mapper compiler emits a record-conversion procedure, this
//! compiler emits an interception shape: one pre-resolved accessor pair per
//! property of the base type. The shape is the portable rendition of a
//! generated subtype; instances wrap a base value and route every assignment
//! through the before/mutate/after sequence (see [`super::Intercepted`]).
//!
//! A shape is compiled once per base type and cached by the engine;
//! instantiation from a compiled shape is cheap.

use crate::descriptor::{Getter, Reflect, Setter, TypeDescriptor};
use crate::error::{Error, Result};
use crate::value::ValueKind;

/// One interceptable property: its name, kind, and pre-resolved base
/// accessors
pub struct PropertyOp<T> {
    /// Property name, used to look up observers at interception time
    pub name: &'static str,
    /// Declared value kind
    pub kind: ValueKind,
    /// Base getter; delegated to unchanged
    pub get: Getter<T>,
    /// Base setter; applied exactly once per intercepted assignment
    pub set: Setter<T>,
}

impl<T> Clone for PropertyOp<T> {
    fn clone(&self) -> Self {
        PropertyOp {
            name: self.name,
            kind: self.kind,
            get: self.get,
            set: self.set,
        }
    }
}

impl<T> std::fmt::Debug for PropertyOp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyOp")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// The compiled interception shape of a base type
pub struct ProxyShape<T> {
    type_name: &'static str,
    construct: fn() -> T,
    ops: Vec<PropertyOp<T>>,
}

impl<T> ProxyShape<T> {
    /// Identity of the base type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Interception ops in declaration order
    pub fn ops(&self) -> &[PropertyOp<T>] {
        &self.ops
    }

    /// Construct a fresh base instance
    pub(crate) fn construct(&self) -> T {
        (self.construct)()
    }

    /// Resolve a property selector (the property's getter) to its
    /// interception op.
    ///
    /// Fails with `InvalidPropertySelector` when the selector is not one of
    /// the base type's property getters.
    pub fn resolve(&self, selector: Getter<T>) -> Result<&PropertyOp<T>> {
        self.ops
            .iter()
            .find(|op| std::ptr::fn_addr_eq(op.get, selector))
            .ok_or(Error::InvalidPropertySelector(self.type_name))
    }
}

impl<T> std::fmt::Debug for ProxyShape<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.ops.iter().map(|op| op.name).collect();
        f.debug_struct("ProxyShape")
            .field("type_name", &self.type_name)
            .field("properties", &names)
            .finish()
    }
}

/// Compiler for interception shapes
pub struct ProxyCompiler;

impl ProxyCompiler {
    /// Compile a descriptor into an interception shape.
    ///
    /// Fails with `PropertyNotOverridable` when any property of the base
    /// type lacks the overridable capability; a shape that silently skipped
    /// a property would let assignments bypass the callback sequence.
    pub fn compile<T: Reflect>(descriptor: &TypeDescriptor<T>) -> Result<ProxyShape<T>> {
        let type_name = descriptor.type_name();
        let mut ops = Vec::with_capacity(descriptor.fields().len());
        for spec in descriptor.fields() {
            if !spec.overridable {
                return Err(Error::PropertyNotOverridable {
                    type_name,
                    property: spec.name,
                });
            }
            ops.push(PropertyOp {
                name: spec.name,
                kind: spec.kind,
                get: spec.get,
                set: spec.set,
            });
        }

        tracing::debug!(type_name, properties = ops.len(), "compiled proxy shape");

        Ok(ProxyShape {
            type_name,
            construct: descriptor.constructor(),
            ops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect_record;
    use crate::value::FieldValue;

    reflect_record! {
        struct Open {
            overridable "Name" => name: OptStr,
            overridable "Alias" => alias: OptStr,
        }
    }

    reflect_record! {
        struct PartlySealed {
            overridable "Name" => name: OptStr,
            "Serial" => serial: Str,
        }
    }

    #[test]
    fn test_compile_collects_all_properties() {
        let descriptor = TypeDescriptor::<Open>::extract().unwrap();
        let shape = ProxyCompiler::compile(&descriptor).unwrap();
        let names: Vec<&str> = shape.ops().iter().map(|op| op.name).collect();
        assert_eq!(names, vec!["Name", "Alias"]);
    }

    #[test]
    fn test_non_overridable_property_rejects_the_whole_type() {
        let descriptor = TypeDescriptor::<PartlySealed>::extract().unwrap();
        let err = ProxyCompiler::compile(&descriptor).unwrap_err();
        assert!(matches!(
            err,
            Error::PropertyNotOverridable {
                property: "Serial",
                ..
            }
        ));
    }

    #[test]
    fn test_selector_resolution() {
        let descriptor = TypeDescriptor::<Open>::extract().unwrap();
        let shape = ProxyCompiler::compile(&descriptor).unwrap();

        let name_getter = descriptor.field("Name").unwrap().get;
        assert_eq!(shape.resolve(name_getter).unwrap().name, "Name");

        let foreign: Getter<Open> = |_| FieldValue::Null;
        let err = shape.resolve(foreign).unwrap_err();
        assert!(matches!(err, Error::InvalidPropertySelector("Open")));
    }
}
