//! Heap object model types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to an object slot in a [`Heap`](super::Heap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HeapId(u32);

impl HeapId {
    /// # Panics
    /// If `index` does not fit in a `u32`: a heap holds at most `u32::MAX`
    /// slots.
    pub(crate) fn new(index: usize) -> Self {
        let index = u32::try_from(index).expect("heap slot count exceeds u32::MAX");
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for HeapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Handle to a class registered with a [`Heap`](super::Heap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(u32);

impl ClassId {
    /// Builtin root class.
    pub const OBJECT: ClassId = ClassId(0);
    /// Builtin identity-keyed table.
    pub const IDENTITY_TABLE: ClassId = ClassId(1);

    /// # Panics
    /// If `index` does not fit in a `u32`.
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("class count exceeds u32::MAX"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
        }
    }

    pub(crate) fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
        }
    }
}

/// Contents of a field, static or array slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Ref(HeapId),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_object(&self) -> Option<HeapId> {
        match self {
            Self::Ref(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Int(_) | Self::Float(_))
    }
}

impl From<HeapId> for Value {
    fn from(id: HeapId) -> Self {
        Self::Ref(id)
    }
}

impl From<Option<HeapId>> for Value {
    fn from(id: Option<HeapId>) -> Self {
        id.map_or(Self::Null, Self::Ref)
    }
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Reference,
    Primitive(PrimitiveKind),
}

impl FieldKind {
    pub(crate) fn default_value(self) -> Value {
        match self {
            Self::Reference => Value::Null,
            Self::Primitive(kind) => kind.zero(),
        }
    }

    /// Whether `value` may be stored in a slot of this kind.
    pub(crate) fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Reference, Value::Null | Value::Ref(_)) => true,
            (Self::Primitive(PrimitiveKind::Bool), Value::Bool(_)) => true,
            (Self::Primitive(PrimitiveKind::Int), Value::Int(_)) => true,
            (Self::Primitive(PrimitiveKind::Float), Value::Float(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticDef {
    pub name: String,
    pub kind: FieldKind,
    pub initial: Value,
}

/// Class declaration: instance fields, static fields and an optional
/// superclass (defaults to `Object`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub superclass: Option<ClassId>,
    pub fields: Vec<FieldDef>,
    pub statics: Vec<StaticDef>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            fields: Vec::new(),
            statics: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: ClassId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Declare a reference-typed instance field.
    pub fn reference(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind: FieldKind::Reference,
        });
        self
    }

    /// Declare a primitive instance field.
    pub fn primitive(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind: FieldKind::Primitive(kind),
        });
        self
    }

    /// Declare a static field with its initial value.
    pub fn static_field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        initial: Value,
    ) -> Self {
        self.statics.push(StaticDef {
            name: name.into(),
            kind,
            initial,
        });
        self
    }
}

/// Runtime type of a heap object; the class key used by class reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeapType {
    Instance(ClassId),
    /// Array of references; `None` is an `Object[]`.
    ObjectArray(Option<ClassId>),
    PrimitiveArray(PrimitiveKind),
}

#[derive(Debug, Clone)]
pub(crate) enum HeapObject {
    Instance { class: ClassId, slots: Vec<Value> },
    ObjectArray {
        component: Option<ClassId>,
        items: Vec<Option<HeapId>>,
    },
    PrimitiveArray {
        kind: PrimitiveKind,
        items: Vec<Value>,
    },
}

impl HeapObject {
    pub(crate) fn heap_type(&self) -> HeapType {
        match self {
            Self::Instance { class, .. } => HeapType::Instance(*class),
            Self::ObjectArray { component, .. } => HeapType::ObjectArray(*component),
            Self::PrimitiveArray { kind, .. } => HeapType::PrimitiveArray(*kind),
        }
    }
}

/// An arena slot. Freed slots keep their type so stale handles still have
/// a class.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Live(HeapObject),
    Freed(HeapType),
}
