//! Type descriptors: the extracted, cacheable shape of a target type
//!
//! A [`TypeDescriptor`] is an ordered list of field accessors plus a selected
//! zero-argument constructor. Types opt in by implementing [`Reflect`],
//! usually through the [`reflect_record!`](crate::reflect_record) macro,
//! which generates the accessor table at build time so no per-field code has
//! to be written by hand.
//!
//! Extraction is pure: the same type always yields the same descriptor, with
//! fields in declaration order. Caching is the engine's job, not ours.

use crate::error::{Error, Result};
use crate::value::{FieldValue, ValueKind};
use std::fmt;

/// Read a field from an instance
pub type Getter<T> = fn(&T) -> FieldValue;

/// Write a field on an instance; fails with `TypeMismatch` when handed a
/// value of the wrong variant
pub type Setter<T> = fn(&mut T, FieldValue) -> Result<()>;

/// One field of a reflectable type: its name, kind, interception capability,
/// and direct accessors
pub struct FieldSpec<T> {
    /// Field name as it appears in records
    pub name: &'static str,
    /// Declared value kind
    pub kind: ValueKind,
    /// Whether a proxy shape may intercept assignments to this field
    pub overridable: bool,
    /// Direct getter
    pub get: Getter<T>,
    /// Direct setter
    pub set: Setter<T>,
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("overridable", &self.overridable)
            .finish()
    }
}

/// A type whose shape can be extracted at runtime
///
/// Implementations are normally generated by
/// [`reflect_record!`](crate::reflect_record). Hand-written implementations
/// are fine too; the only requirements are a stable field order and accessors
/// that agree with the declared kinds.
pub trait Reflect: Sized + 'static {
    /// Type identity, unique within one process
    const TYPE_NAME: &'static str;

    /// Ordered field table; order must be stable across calls
    fn fields() -> &'static [FieldSpec<Self>];

    /// The zero-argument constructor, if the type has one
    fn constructor() -> Option<fn() -> Self>;
}

/// The extracted shape of a target type: identity, ordered fields, and a
/// selected constructor. Immutable once extracted.
pub struct TypeDescriptor<T: 'static> {
    type_name: &'static str,
    fields: &'static [FieldSpec<T>],
    construct: fn() -> T,
}

impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeDescriptor<T> {}

impl<T: Reflect> TypeDescriptor<T> {
    /// Extract the descriptor for `T`.
    ///
    /// Pure and uncached. Fails with `NoUsableConstructor` when the type
    /// declares no zero-argument constructor.
    pub fn extract() -> Result<Self> {
        let construct =
            T::constructor().ok_or(Error::NoUsableConstructor(T::TYPE_NAME))?;
        Ok(Self {
            type_name: T::TYPE_NAME,
            fields: T::fields(),
            construct,
        })
    }
}

impl<T> TypeDescriptor<T> {
    /// The type's identity
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &'static [FieldSpec<T>] {
        self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec<T>> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Construct a default instance
    pub fn construct(&self) -> T {
        (self.construct)()
    }

    /// The selected constructor
    pub fn constructor(&self) -> fn() -> T {
        self.construct
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Summary of one field in a type-erased descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSummary {
    pub name: &'static str,
    pub kind: ValueKind,
    pub overridable: bool,
}

/// Type-erased descriptor summary, used for name-based resolution and
/// display
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Type identity
    pub name: &'static str,
    /// Field summaries in declaration order
    pub fields: Vec<FieldSummary>,
}

impl TypeInfo {
    /// Build the erased summary for a reflectable type
    pub fn of<T: Reflect>() -> Self {
        Self {
            name: T::TYPE_NAME,
            fields: T::fields()
                .iter()
                .map(|spec| FieldSummary {
                    name: spec.name,
                    kind: spec.kind,
                    overridable: spec.overridable,
                })
                .collect(),
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.name)?;
        for field in &self.fields {
            let capability = if field.overridable { " (overridable)" } else { "" };
            writeln!(f, "    {}: {}{}", field.name, field.kind, capability)?;
        }
        write!(f, "}}")
    }
}

/// Declare a record struct and generate its [`Reflect`] implementation.
///
/// Each field maps a record entry name to a struct field and a storage kind:
/// `Str` (a `String`), `Int` (an `i64`), or `OptStr` (an `Option<String>`
/// surfaced as `FieldValue::Null` before first assignment). Prefixing a field
/// with `overridable` marks it interceptable by proxy shapes.
///
/// ```
/// recast::reflect_record! {
///     pub struct Contact {
///         "Name" => name: Str,
///         overridable "Email" => email: OptStr,
///     }
/// }
/// ```
#[macro_export]
macro_rules! reflect_record {
    (@storage Str) => { ::std::string::String };
    (@storage Int) => { i64 };
    (@storage OptStr) => { ::std::option::Option<::std::string::String> };

    (@kind Str) => { $crate::ValueKind::Str };
    (@kind Int) => { $crate::ValueKind::Int };
    (@kind OptStr) => { $crate::ValueKind::Str };

    (@flag) => { false };
    (@flag overridable) => { true };

    (@get $name:ident, $field:ident, Str) => {
        |obj: &$name| $crate::FieldValue::Str(obj.$field.clone())
    };
    (@get $name:ident, $field:ident, Int) => {
        |obj: &$name| $crate::FieldValue::Int(obj.$field)
    };
    (@get $name:ident, $field:ident, OptStr) => {
        |obj: &$name| match &obj.$field {
            ::std::option::Option::Some(s) => $crate::FieldValue::Str(s.clone()),
            ::std::option::Option::None => $crate::FieldValue::Null,
        }
    };

    (@set $name:ident, $field:ident, $fname:literal, Str) => {
        |obj: &mut $name, value: $crate::FieldValue| match value {
            $crate::FieldValue::Str(s) => {
                obj.$field = s;
                ::std::result::Result::Ok(())
            }
            other => ::std::result::Result::Err($crate::Error::value_mismatch(
                $fname,
                $crate::ValueKind::Str,
                &other,
            )),
        }
    };
    (@set $name:ident, $field:ident, $fname:literal, Int) => {
        |obj: &mut $name, value: $crate::FieldValue| match value {
            $crate::FieldValue::Int(n) => {
                obj.$field = n;
                ::std::result::Result::Ok(())
            }
            other => ::std::result::Result::Err($crate::Error::value_mismatch(
                $fname,
                $crate::ValueKind::Int,
                &other,
            )),
        }
    };
    (@set $name:ident, $field:ident, $fname:literal, OptStr) => {
        |obj: &mut $name, value: $crate::FieldValue| match value {
            $crate::FieldValue::Str(s) => {
                obj.$field = ::std::option::Option::Some(s);
                ::std::result::Result::Ok(())
            }
            $crate::FieldValue::Null => {
                obj.$field = ::std::option::Option::None;
                ::std::result::Result::Ok(())
            }
            other => ::std::result::Result::Err($crate::Error::value_mismatch(
                $fname,
                $crate::ValueKind::Str,
                &other,
            )),
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $($flag:ident)? $fname:literal => $field:ident : $kind:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( pub $field: $crate::reflect_record!(@storage $kind) ),+
        }

        impl $crate::descriptor::Reflect for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn fields() -> &'static [$crate::descriptor::FieldSpec<Self>] {
                static FIELDS: &[$crate::descriptor::FieldSpec<$name>] = &[
                    $( $crate::descriptor::FieldSpec {
                        name: $fname,
                        kind: $crate::reflect_record!(@kind $kind),
                        overridable: $crate::reflect_record!(@flag $($flag)?),
                        get: $crate::reflect_record!(@get $name, $field, $kind),
                        set: $crate::reflect_record!(@set $name, $field, $fname, $kind),
                    } ),+
                ];
                FIELDS
            }

            fn constructor() -> Option<fn() -> Self> {
                Some(Self::default)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect_record;

    reflect_record! {
        struct Widget {
            "Label" => label: Str,
            "Count" => count: Int,
            overridable "Note" => note: OptStr,
        }
    }

    struct Sealed;

    impl Reflect for Sealed {
        const TYPE_NAME: &'static str = "Sealed";

        fn fields() -> &'static [FieldSpec<Self>] {
            &[]
        }

        fn constructor() -> Option<fn() -> Self> {
            None
        }
    }

    #[test]
    fn test_extraction_preserves_declaration_order() {
        let descriptor = TypeDescriptor::<Widget>::extract().unwrap();
        let names: Vec<&str> = descriptor.fields().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Label", "Count", "Note"]);

        // Repeated extraction yields the same order
        let again = TypeDescriptor::<Widget>::extract().unwrap();
        let names_again: Vec<&str> = again.fields().iter().map(|s| s.name).collect();
        assert_eq!(names, names_again);
    }

    #[test]
    fn test_accessors_roundtrip() {
        let descriptor = TypeDescriptor::<Widget>::extract().unwrap();
        let mut widget = descriptor.construct();

        let label = descriptor.field("Label").unwrap();
        (label.set)(&mut widget, FieldValue::Str("gear".to_string())).unwrap();
        assert_eq!((label.get)(&widget), FieldValue::Str("gear".to_string()));

        let count = descriptor.field("Count").unwrap();
        (count.set)(&mut widget, FieldValue::Int(7)).unwrap();
        assert_eq!(widget.count, 7);
    }

    #[test]
    fn test_setter_rejects_wrong_variant() {
        let descriptor = TypeDescriptor::<Widget>::extract().unwrap();
        let mut widget = descriptor.construct();
        let count = descriptor.field("Count").unwrap();
        let err = (count.set)(&mut widget, FieldValue::Str("seven".to_string())).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_optstr_starts_null() {
        let descriptor = TypeDescriptor::<Widget>::extract().unwrap();
        let widget = descriptor.construct();
        let note = descriptor.field("Note").unwrap();
        assert_eq!((note.get)(&widget), FieldValue::Null);
        assert!(note.overridable);
    }

    #[test]
    fn test_no_usable_constructor() {
        let err = TypeDescriptor::<Sealed>::extract().unwrap_err();
        assert!(matches!(err, Error::NoUsableConstructor("Sealed")));
    }

    #[test]
    fn test_type_info_display() {
        let info = TypeInfo::of::<Widget>();
        let rendered = info.to_string();
        assert!(rendered.starts_with("Widget {"));
        assert!(rendered.contains("Label: str"));
        assert!(rendered.contains("Note: str (overridable)"));
    }
}
