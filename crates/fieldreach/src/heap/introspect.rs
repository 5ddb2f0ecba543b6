//! `Introspector` implementation for the arena heap.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::arena::Heap;
use super::types::{ClassId, FieldKind, HeapId, HeapObject, HeapType, Value};
use crate::errors::IntrospectionError;
use crate::introspect::{Fields, Introspector, ObjectId};

impl Heap {
    /// Identity of a heap handle.
    pub fn identity_of(&self, id: HeapId) -> ObjectId {
        ObjectId::from_raw(id.index() as u64)
    }

    /// Every non-null reference held by an instance: its own and inherited
    /// instance fields, then the static fields of each class in its chain.
    ///
    /// A name belongs to its most-derived declaration, whatever that holds,
    /// matching field lookup by name. Shadowed declarations are not reported;
    /// a shadowed one holding a different object is dropped with a warning.
    fn instance_fields(&self, class: ClassId, slots: &[Value]) -> Fields<HeapId> {
        let mut fields: Fields<HeapId> = Vec::new();
        let mut seen: FxHashMap<&str, Option<HeapId>> = FxHashMap::default();

        for ancestor in self.chain(class) {
            let entry = &self.classes[ancestor.index()];
            for (i, field) in entry.def.fields.iter().enumerate() {
                let value = &slots[entry.slot_offset + i];
                push_field(&mut fields, &mut seen, &field.name, field.kind, value);
            }
            for (def, value) in entry.def.statics.iter().zip(&entry.statics) {
                push_field(&mut fields, &mut seen, &def.name, def.kind, value);
            }
        }

        fields
    }
}

fn push_field<'h>(
    fields: &mut Fields<HeapId>,
    seen: &mut FxHashMap<&'h str, Option<HeapId>>,
    name: &'h str,
    kind: FieldKind,
    value: &Value,
) {
    let target = match kind {
        FieldKind::Reference => value.as_object(),
        FieldKind::Primitive(_) => None,
    };
    if let Some(&kept) = seen.get(name) {
        if let Some(dropped) = target.filter(|&t| Some(t) != kept) {
            warn!(
                field = name,
                kept = ?kept,
                %dropped,
                "shadowed field holds a different object; it is not reported"
            );
        }
        return;
    }
    seen.insert(name, target);
    if let Some(target) = target {
        fields.push((name.to_string(), target));
    }
}

impl Introspector for Heap {
    type Object = HeapId;
    type Class = HeapType;

    fn identity(&self, object: &HeapId) -> ObjectId {
        self.identity_of(*object)
    }

    fn class_of(&self, object: &HeapId) -> HeapType {
        // Handles always come from this heap; a foreign one reads as `Object`.
        self.type_of(*object)
            .unwrap_or(HeapType::Instance(ClassId::OBJECT))
    }

    fn fields(&self, object: &HeapId) -> Result<Fields<HeapId>, IntrospectionError> {
        let Some(heap_object) = self.object(*object) else {
            return Err(IntrospectionError::Dangling {
                object: self.identity_of(*object),
            });
        };

        let fields = match heap_object {
            HeapObject::Instance { class, slots } => self.instance_fields(*class, slots),
            HeapObject::ObjectArray { items, .. } => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| item.map(|target| (i.to_string(), target)))
                .collect(),
            HeapObject::PrimitiveArray { .. } => Vec::new(),
        };
        Ok(fields)
    }

    fn null_sentinel(&self) -> Option<ObjectId> {
        Some(self.identity_of(self.null_key()))
    }
}
