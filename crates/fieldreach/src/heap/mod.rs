//! In-process object model.
//!
//! An arena of class instances, reference arrays and primitive arrays with
//! single-inheritance classes and static fields. The heap is a complete
//! [`Introspector`](crate::introspect::Introspector): it reports inherited and
//! static fields, skips primitives and nulls, keys array components by index,
//! and exposes the null-key object its identity tables use.

mod access;
mod arena;
mod introspect;
mod types;

pub use arena::Heap;
pub use types::{
    ClassDef, ClassId, FieldDef, FieldKind, HeapId, HeapType, PrimitiveKind, StaticDef, Value,
};
