//! Recast: a runtime type-specialization engine written in Rust
//!
//! Recast maps loosely-typed string records into strongly-typed values and
//! intercepts field mutation on values without modifying their defining
//! types. The interesting part is the specialization engine: given a type
//! only identified at runtime, it produces a reusable, cached, directly
//! executable artifact (a compiled mapper, or a compiled proxy shape with
//! interception hooks) that does the same work a hand-written procedure
//! would, without re-inspecting type metadata on each invocation.
//!
//! # Quick Start
//!
//! ```
//! use recast::{record_from_pairs, Specializer};
//!
//! recast::reflect_record! {
//!     pub struct Contact {
//!         "Name" => name: Str,
//!         "City" => city: Str,
//!     }
//! }
//!
//! fn main() -> recast::Result<()> {
//!     let engine = Specializer::new();
//!     let mapper = engine.mapper_for::<Contact>()?;
//!     let contact = mapper.invoke(&record_from_pairs([
//!         ("Name", "Ada"),
//!         ("City", "London"),
//!     ]))?;
//!     assert_eq!(contact.name, "Ada");
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! A request flows: [`descriptor`] (extract the type's shape) → [`mapper`] /
//! [`proxy`] (compile an artifact) → [`engine`] (cache it per type identity).
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Core** | [`descriptor`], [`mapper`], [`proxy`], [`engine`], [`error`](Error) |
//! | **Data** | [`value`], [`record`] |
//! | **Collaborators** | [`harness`], [`dispatch`], [`samples`] |

pub mod descriptor;
pub mod dispatch;
pub mod engine;
pub mod harness;
pub mod mapper;
pub mod proxy;
pub mod record;
pub mod samples;
pub mod value;

mod error;

pub use descriptor::{FieldSpec, Getter, Reflect, Setter, TypeDescriptor, TypeInfo};
pub use engine::Specializer;
pub use error::{Error, Result};
pub use mapper::{CompiledMapper, MapperCompiler, ReflectiveMapper};
pub use proxy::{CallbackRegistry, Proxy, ProxyCompiler, ProxyShape};
pub use record::{record_from_pairs, records_from_json, records_to_json, Record};
pub use value::{FieldValue, ValueKind};

/// Recast version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
