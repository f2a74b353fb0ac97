//! Which keys are currently mocked, per object.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;

/// Address of an object's allocation. Only meaningful while the object is
/// alive; each index entry holds the object itself so its address cannot be
/// handed to a new object while the entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ObjectId(usize);

impl ObjectId {
    fn of(o: &JsObjectType) -> Self {
        ObjectId(Rc::as_ptr(o) as *const () as usize)
    }
}

struct IndexEntry {
    target: JsObjectType,
    keys: HashSet<PropertyKey>,
}

#[derive(Default)]
pub struct MockedKeyIndex {
    entries: HashMap<ObjectId, IndexEntry>,
}

impl MockedKeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: &JsObjectType, key: PropertyKey) {
        self.entries
            .entry(ObjectId::of(target))
            .or_insert_with(|| IndexEntry {
                target: target.clone(),
                keys: HashSet::new(),
            })
            .keys
            .insert(key);
    }

    fn entry_for(&self, target: &JsObjectType) -> Option<&IndexEntry> {
        self.entries
            .get(&ObjectId::of(target))
            .filter(|e| Rc::ptr_eq(&e.target, target))
    }

    pub fn contains(&self, target: &JsObjectType, key: &PropertyKey) -> bool {
        self.entry_for(target)
            .map_or(false, |e| e.keys.contains(key))
    }

    pub fn keys_of(&self, target: &JsObjectType) -> HashSet<PropertyKey> {
        self.entry_for(target)
            .map(|e| e.keys.clone())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
