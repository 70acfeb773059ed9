use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector which can only be indexed by values of type `Key`.
///
/// The solver stores most of its per-variable and per-literal information in these; typing the
/// index prevents accidentally looking up a literal-indexed array with a variable.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::new(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends `value` and returns the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);
        Key::create_from_index(self.elements.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    /// Grows the vector with values produced by `fill` until it has `new_len` entries. Does
    /// nothing when the vector is already at least that long.
    pub(crate) fn grow_with(&mut self, new_len: usize, fill: impl FnMut() -> Value) {
        if new_len > self.elements.len() {
            self.elements.resize_with(new_len, fill);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Grows the vector with copies of `value` until it has `new_len` entries.
    pub(crate) fn grow(&mut self, new_len: usize, value: Value) {
        if new_len > self.elements.len() {
            self.elements.resize(new_len, value);
        }
    }

    /// Overwrites every entry with `value` without changing the length.
    pub(crate) fn fill(&mut self, value: Value) {
        self.elements.fill(value);
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, key: Key) -> &Self::Output {
        &self.elements[key.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, key: Key) -> &mut Self::Output {
        &mut self.elements[key.index()]
    }
}

/// A key which can be turned into a dense index and back.
pub trait StorageKey {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}
