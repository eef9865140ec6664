use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Typed handle into a [`Blackboard`].
///
/// Keys are plain constants, so a typo is a compile error instead of a silent
/// miss. The name is only used for tree introspection and logs; storage is keyed
/// by `id`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self::named(id, "")
    }

    pub const fn named(id: u64, name: &'static str) -> Self {
        Self {
            id,
            name,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Per-agent key/value scratchpad.
///
/// Written by perception, read by tree conditions. Values are overwritten
/// wholesale; nothing is versioned.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(&key.id)?;
        value
            .downcast_ref::<T>()
            .or_else(|| type_mismatch(key.id, key.name))
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        value
            .downcast_mut::<T>()
            .or_else(|| type_mismatch(key.id, key.name))
    }

    /// Copy out a value; the common case for the scalar perception keys.
    pub fn get_copied<T: Copy + 'static>(&self, key: BbKey<T>) -> Option<T> {
        self.get(key).copied()
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        value
            .downcast::<T>()
            .map(|b| *b)
            .ok()
            .or_else(|| type_mismatch(key.id, key.name))
    }
}

fn type_mismatch<R>(id: u64, name: &str) -> Option<R> {
    panic!("blackboard type mismatch for key id={id} name={name:?} (stored type differs from requested)")
}
