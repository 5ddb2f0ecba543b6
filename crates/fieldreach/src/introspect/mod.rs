//! The introspection seam.
//!
//! The walker never looks inside objects itself. Everything it learns about
//! an object comes through an [`Introspector`]: its identity, its class, and
//! the non-null reference values held by its fields or array slots.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::errors::IntrospectionError;

/// Field values reported for one object, in enumeration order.
///
/// Keys are field names, or stringified indices for array components.
pub type Fields<O> = Vec<(String, O)>;

/// Identity of a runtime object: an address or handle, never a value hash.
///
/// Two distinct objects that are value-equal have different identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Identity derived from the address of a live reference.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self((value as *const T).cast::<()>() as usize as u64)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Privileged view into an object graph.
///
/// Implementations must report every non-null, non-primitive value reachable
/// through one field step: declared, inherited, private and static fields
/// alike. For arrays of references they report the non-null components keyed
/// by index; arrays of primitives report nothing.
pub trait Introspector {
    /// Handle to an object in the inspected graph.
    type Object: Clone;
    /// Runtime type of an object, used to group results by class.
    type Class: Clone + Eq + Hash + fmt::Debug;

    fn identity(&self, object: &Self::Object) -> ObjectId;

    fn class_of(&self, object: &Self::Object) -> Self::Class;

    /// Non-null reference values of `object`'s fields or array components.
    fn fields(&self, object: &Self::Object) -> Result<Fields<Self::Object>, IntrospectionError>;

    /// Identity of a private object the introspector uses to stand for an
    /// absent key in its own identity tables.
    ///
    /// Values with this identity are never reported as reachable.
    fn null_sentinel(&self) -> Option<ObjectId> {
        None
    }
}

impl<I: Introspector + ?Sized> Introspector for &I {
    type Object = I::Object;
    type Class = I::Class;

    fn identity(&self, object: &Self::Object) -> ObjectId {
        (**self).identity(object)
    }

    fn class_of(&self, object: &Self::Object) -> Self::Class {
        (**self).class_of(object)
    }

    fn fields(&self, object: &Self::Object) -> Result<Fields<Self::Object>, IntrospectionError> {
        (**self).fields(object)
    }

    fn null_sentinel(&self) -> Option<ObjectId> {
        (**self).null_sentinel()
    }
}
