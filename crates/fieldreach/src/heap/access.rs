//! Path-based field accessors.
//!
//! Each step reads one named field (or array index) of the current object.
//! Lookup searches the most-derived class first and, within a class, instance
//! fields before static fields.

use super::arena::Heap;
use super::types::{ClassId, FieldKind, HeapId, HeapObject, Value};
use crate::errors::AccessError;
use crate::path::FieldPath;

/// Where a named field of an instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldLocation {
    Instance { slot: usize, kind: FieldKind },
    Static {
        class: ClassId,
        index: usize,
        kind: FieldKind,
    },
}

impl Heap {
    /// Read the field `name` of `object`. For arrays `name` is an index.
    pub fn read_field(&self, object: HeapId, name: &str) -> Result<Value, AccessError> {
        match self.object(object).ok_or(AccessError::Dangling(object))? {
            HeapObject::Instance { class, slots } => match self.find_field(*class, name)? {
                FieldLocation::Instance { slot, .. } => Ok(slots[slot]),
                FieldLocation::Static { class, index, .. } => {
                    Ok(self.classes[class.index()].statics[index])
                }
            },
            HeapObject::ObjectArray { items, .. } => {
                let index = checked_index(name, items.len())?;
                Ok(Value::from(items[index]))
            }
            HeapObject::PrimitiveArray { items, .. } => {
                let index = checked_index(name, items.len())?;
                Ok(items[index])
            }
        }
    }

    /// Set the field `name` of `object` to `value`, returning the old value.
    /// For arrays `name` is an index.
    pub fn write_field(
        &mut self,
        object: HeapId,
        name: &str,
        value: Value,
    ) -> Result<Value, AccessError> {
        let location = match self.object(object).ok_or(AccessError::Dangling(object))? {
            HeapObject::Instance { class, .. } => Some(self.find_field(*class, name)?),
            _ => None,
        };

        match location {
            Some(FieldLocation::Static { class, index, kind }) => {
                check_kind(kind, &value, name)?;
                let statics = &mut self.classes[class.index()].statics;
                Ok(std::mem::replace(&mut statics[index], value))
            }
            Some(FieldLocation::Instance { slot, kind }) => {
                check_kind(kind, &value, name)?;
                match self.object_mut(object) {
                    Some(HeapObject::Instance { slots, .. }) => {
                        Ok(std::mem::replace(&mut slots[slot], value))
                    }
                    _ => Err(AccessError::Dangling(object)),
                }
            }
            None => match self.object_mut(object) {
                Some(HeapObject::ObjectArray { items, .. }) => {
                    let index = checked_index(name, items.len())?;
                    check_kind(FieldKind::Reference, &value, name)?;
                    let old = std::mem::replace(&mut items[index], value.as_object());
                    Ok(Value::from(old))
                }
                Some(HeapObject::PrimitiveArray { kind, items }) => {
                    let index = checked_index(name, items.len())?;
                    check_kind(FieldKind::Primitive(*kind), &value, name)?;
                    Ok(std::mem::replace(&mut items[index], value))
                }
                _ => Err(AccessError::Dangling(object)),
            },
        }
    }

    /// Builder shorthand for [`write_field`](Self::write_field) that drops
    /// the old value.
    pub fn set(
        &mut self,
        object: HeapId,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), AccessError> {
        self.write_field(object, name, value.into()).map(|_| ())
    }

    pub fn read_static(&self, class: ClassId, name: &str) -> Result<Value, AccessError> {
        let (owner, index, _) = self.find_static(class, name)?;
        Ok(self.classes[owner.index()].statics[index])
    }

    /// Set a static field, returning the old value.
    pub fn write_static(
        &mut self,
        class: ClassId,
        name: &str,
        value: Value,
    ) -> Result<Value, AccessError> {
        let (owner, index, kind) = self.find_static(class, name)?;
        check_kind(kind, &value, name)?;
        let slot = &mut self.classes[owner.index()].statics[index];
        Ok(std::mem::replace(slot, value))
    }

    /// Follow `path` from `root`, one field per segment.
    pub fn read_path<S: AsRef<str>>(&self, root: HeapId, path: &[S]) -> Result<Value, AccessError> {
        let mut current = Value::Ref(root);
        for segment in path {
            let segment = segment.as_ref();
            let object = follow(&current, segment)?;
            current = self.read_field(object, segment)?;
        }
        Ok(current)
    }

    /// Follow all but the last segment of `path` from `root`, then write the
    /// last one. Returns the old value.
    pub fn write_path<S: AsRef<str>>(
        &mut self,
        root: HeapId,
        value: Value,
        path: &[S],
    ) -> Result<Value, AccessError> {
        let (last, parents) = path.split_last().ok_or(AccessError::EmptyPath)?;
        let last = last.as_ref();
        let parent = self.read_path(root, parents)?;
        let object = follow(&parent, last)?;
        self.write_field(object, last, value)
    }

    /// Read the static `first` of `class`, then follow `rest`.
    pub fn read_path_from_static<S: AsRef<str>>(
        &self,
        class: ClassId,
        first: &str,
        rest: &[S],
    ) -> Result<Value, AccessError> {
        let start = self.read_static(class, first)?;
        match rest.first() {
            Some(next) => self.read_path(follow(&start, next.as_ref())?, rest),
            None => Ok(start),
        }
    }

    /// Write through a path starting at the static `first` of `class`.
    /// With an empty `rest` the static itself is written.
    pub fn write_path_from_static<S: AsRef<str>>(
        &mut self,
        class: ClassId,
        value: Value,
        first: &str,
        rest: &[S],
    ) -> Result<Value, AccessError> {
        let Some(next) = rest.first() else {
            return self.write_static(class, first, value);
        };
        let start = self.read_static(class, first)?;
        let object = follow(&start, next.as_ref())?;
        self.write_path(object, value, rest)
    }

    /// Read the value a reachability [`FieldPath`] leads to from `root`.
    pub fn resolve(&self, root: HeapId, path: &FieldPath) -> Result<Value, AccessError> {
        let segments = path.segments().ok_or(AccessError::UnknownPath)?;
        self.read_path(root, segments)
    }

    fn find_field(&self, class: ClassId, name: &str) -> Result<FieldLocation, AccessError> {
        for ancestor in self.chain(class) {
            let entry = &self.classes[ancestor.index()];
            if let Some(i) = entry.def.fields.iter().position(|f| f.name == name) {
                return Ok(FieldLocation::Instance {
                    slot: entry.slot_offset + i,
                    kind: entry.def.fields[i].kind,
                });
            }
            if let Some(i) = entry.def.statics.iter().position(|s| s.name == name) {
                return Ok(FieldLocation::Static {
                    class: ancestor,
                    index: i,
                    kind: entry.def.statics[i].kind,
                });
            }
        }
        Err(AccessError::NoSuchField {
            class: self.class_name(class).to_string(),
            field: name.to_string(),
        })
    }

    fn find_static(
        &self,
        class: ClassId,
        name: &str,
    ) -> Result<(ClassId, usize, FieldKind), AccessError> {
        for ancestor in self.chain(class) {
            let entry = &self.classes[ancestor.index()];
            if let Some(i) = entry.def.statics.iter().position(|s| s.name == name) {
                return Ok((ancestor, i, entry.def.statics[i].kind));
            }
        }
        Err(AccessError::NoSuchStatic {
            class: self.class_name(class).to_string(),
            field: name.to_string(),
        })
    }
}

/// The object `value` refers to, for stepping through `segment`.
fn follow(value: &Value, segment: &str) -> Result<HeapId, AccessError> {
    match value {
        Value::Ref(id) => Ok(*id),
        Value::Null => Err(AccessError::NullTraversal {
            segment: segment.to_string(),
        }),
        _ => Err(AccessError::NotAReference {
            segment: segment.to_string(),
        }),
    }
}

fn checked_index(segment: &str, len: usize) -> Result<usize, AccessError> {
    let index: usize = segment.parse().map_err(|_| AccessError::InvalidIndex {
        segment: segment.to_string(),
    })?;
    if index >= len {
        return Err(AccessError::IndexOutOfBounds { index, len });
    }
    Ok(index)
}

fn check_kind(kind: FieldKind, value: &Value, field: &str) -> Result<(), AccessError> {
    if kind.admits(value) {
        Ok(())
    } else {
        Err(AccessError::TypeMismatch {
            field: field.to_string(),
        })
    }
}
