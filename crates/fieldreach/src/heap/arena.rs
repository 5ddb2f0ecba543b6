//! Arena heap: class registry and object allocation.

use smallvec::SmallVec;

use super::types::{
    ClassDef, ClassId, FieldKind, HeapId, HeapObject, HeapType, PrimitiveKind, Slot, Value,
};
use crate::errors::AccessError;

/// Superclass chains are short; most fit inline.
pub(crate) type ClassChain = SmallVec<[ClassId; 8]>;

#[derive(Debug, Clone)]
pub(crate) struct ClassEntry {
    pub(crate) def: ClassDef,
    /// Index of this class's first instance slot; superclass slots come first.
    pub(crate) slot_offset: usize,
    pub(crate) statics: Vec<Value>,
}

/// Arena of objects with single-inheritance classes and static fields.
///
/// `Heap::new` registers two builtin classes, `Object` and `IdentityTable`,
/// and allocates the null-key object identity tables use for absent keys.
///
/// Handles are `u32` indices: allocating past `u32::MAX` objects, or
/// registering past `u32::MAX` classes, panics.
#[derive(Debug, Clone)]
pub struct Heap {
    pub(crate) classes: Vec<ClassEntry>,
    pub(crate) slots: Vec<Slot>,
    null_key: HeapId,
}

impl Heap {
    pub fn new() -> Self {
        let mut heap = Self {
            classes: Vec::new(),
            slots: Vec::new(),
            null_key: HeapId::new(0),
        };

        let object = heap.define_root_class(ClassDef::new("Object"));
        debug_assert_eq!(object, ClassId::OBJECT);
        let table = heap.define_class(
            ClassDef::new("IdentityTable")
                .reference("table")
                .primitive("size", PrimitiveKind::Int),
        );
        debug_assert_eq!(table, ClassId::IDENTITY_TABLE);

        heap.null_key = heap.alloc_instance(ClassId::OBJECT);
        heap
    }

    fn define_root_class(&mut self, def: ClassDef) -> ClassId {
        let id = ClassId::new(self.classes.len());
        let statics = def.statics.iter().map(|s| s.initial).collect();
        self.classes.push(ClassEntry {
            def,
            slot_offset: 0,
            statics,
        });
        id
    }

    /// Register a class. A missing superclass means `Object`.
    ///
    /// # Panics
    /// If the superclass was not registered with this heap.
    pub fn define_class(&mut self, mut def: ClassDef) -> ClassId {
        let superclass = *def.superclass.get_or_insert(ClassId::OBJECT);
        let parent = &self.classes[superclass.index()];
        let slot_offset = parent.slot_offset + parent.def.fields.len();

        let id = ClassId::new(self.classes.len());
        let statics = def.statics.iter().map(|s| s.initial).collect();
        self.classes.push(ClassEntry {
            def,
            slot_offset,
            statics,
        });
        id
    }

    /// The object identity tables use in place of an absent key.
    pub fn null_key(&self) -> HeapId {
        self.null_key
    }

    /// Allocate an instance with every field at its default (`Null`, zero or
    /// `false`).
    ///
    /// # Panics
    /// If `class` was not registered with this heap.
    pub fn alloc_instance(&mut self, class: ClassId) -> HeapId {
        let mut slots = Vec::new();
        for ancestor in self.chain(class).iter().rev() {
            let entry = &self.classes[ancestor.index()];
            slots.extend(entry.def.fields.iter().map(|f| f.kind.default_value()));
        }
        self.push(HeapObject::Instance { class, slots })
    }

    /// Allocate an array of references. `component` of `None` is an
    /// `Object[]`.
    pub fn alloc_object_array(
        &mut self,
        component: Option<ClassId>,
        items: Vec<Option<HeapId>>,
    ) -> HeapId {
        self.push(HeapObject::ObjectArray { component, items })
    }

    /// Allocate an array of primitives.
    ///
    /// Every item must be of `kind`; the first that is not fails with
    /// [`AccessError::TypeMismatch`] naming its index, and nothing is
    /// allocated.
    pub fn alloc_primitive_array(
        &mut self,
        kind: PrimitiveKind,
        items: Vec<Value>,
    ) -> Result<HeapId, AccessError> {
        let slot_kind = FieldKind::Primitive(kind);
        if let Some(index) = items.iter().position(|v| !slot_kind.admits(v)) {
            return Err(AccessError::TypeMismatch {
                field: index.to_string(),
            });
        }
        Ok(self.push(HeapObject::PrimitiveArray { kind, items }))
    }

    /// Allocate an `IdentityTable` holding `entries` as alternating key/value
    /// slots of its `table` array. Absent keys are stored as
    /// [`null_key`](Self::null_key).
    pub fn alloc_identity_table(&mut self, entries: &[(Option<HeapId>, HeapId)]) -> HeapId {
        let mut items = Vec::with_capacity(entries.len() * 2);
        for (key, value) in entries {
            items.push(Some(key.unwrap_or(self.null_key)));
            items.push(Some(*value));
        }
        let table = self.alloc_object_array(None, items);
        let instance = self.alloc_instance(ClassId::IDENTITY_TABLE);
        if let Some(HeapObject::Instance { slots, .. }) = self.object_mut(instance) {
            slots[0] = Value::Ref(table);
            slots[1] = Value::Int(entries.len() as i64);
        }
        instance
    }

    /// Release an object. Its handle stays valid for identity and type but
    /// introspecting or accessing it fails.
    pub fn free(&mut self, id: HeapId) {
        let heap_type = match self.slots.get(id.index()) {
            Some(Slot::Live(object)) => object.heap_type(),
            _ => return,
        };
        self.slots[id.index()] = Slot::Freed(heap_type);
    }

    pub fn is_live(&self, id: HeapId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Live(_)))
    }

    /// Runtime type of `id`, or `None` for a handle from another heap.
    pub fn type_of(&self, id: HeapId) -> Option<HeapType> {
        match self.slots.get(id.index())? {
            Slot::Live(object) => Some(object.heap_type()),
            Slot::Freed(heap_type) => Some(*heap_type),
        }
    }

    pub fn class_name(&self, class: ClassId) -> &str {
        &self.classes[class.index()].def.name
    }

    /// Human-readable type name: `Node`, `Node[]`, `Object[]`, `int[]`.
    pub fn type_name(&self, heap_type: HeapType) -> String {
        match heap_type {
            HeapType::Instance(class) => self.class_name(class).to_string(),
            HeapType::ObjectArray(Some(class)) => format!("{}[]", self.class_name(class)),
            HeapType::ObjectArray(None) => format!("{}[]", self.class_name(ClassId::OBJECT)),
            HeapType::PrimitiveArray(kind) => format!("{}[]", kind.name()),
        }
    }

    /// Number of allocated slots, freed ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `class` followed by its superclasses, most derived first.
    pub(crate) fn chain(&self, class: ClassId) -> ClassChain {
        let mut chain = ClassChain::new();
        let mut current = Some(class);
        while let Some(id) = current {
            chain.push(id);
            current = self.classes[id.index()].def.superclass;
        }
        chain
    }

    pub(crate) fn object(&self, id: HeapId) -> Option<&HeapObject> {
        match self.slots.get(id.index())? {
            Slot::Live(object) => Some(object),
            Slot::Freed(_) => None,
        }
    }

    pub(crate) fn object_mut(&mut self, id: HeapId) -> Option<&mut HeapObject> {
        match self.slots.get_mut(id.index())? {
            Slot::Live(object) => Some(object),
            Slot::Freed(_) => None,
        }
    }

    fn push(&mut self, object: HeapObject) -> HeapId {
        let id = HeapId::new(self.slots.len());
        self.slots.push(Slot::Live(object));
        id
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
