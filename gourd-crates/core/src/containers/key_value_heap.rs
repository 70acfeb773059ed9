//! An indexed max-heap over dense keys with floating point priorities.
//!
//! Keys can be taken out of the heap and put back later; while out, their priority is still
//! tracked, so putting a key back restores it under its up-to-date priority.
use std::ops::AddAssign;
use std::ops::DivAssign;

use super::KeyedVec;
use super::StorageKey;
use crate::gourd_assert_extreme;
use crate::gourd_assert_moderate;

#[derive(Debug, Clone)]
pub struct KeyValueHeap<Key, Value> {
    /// The priorities laid out as a binary heap; positions `[0, size)` form the heap, the
    /// remaining positions hold keys which are currently taken out.
    priorities: Vec<Value>,
    /// The key stored at each position of `priorities`.
    keys_by_position: Vec<Key>,
    /// For every key, the position where its priority lives.
    position_of: KeyedVec<Key, usize>,
    size: usize,
}

impl<Key, Value> Default for KeyValueHeap<Key, Value> {
    fn default() -> Self {
        Self {
            priorities: Vec::new(),
            keys_by_position: Vec::new(),
            position_of: KeyedVec::default(),
            size: 0,
        }
    }
}

impl<Key, Value> KeyValueHeap<Key, Value>
where
    Key: StorageKey + Copy,
    Value: AddAssign<Value> + DivAssign<Value> + PartialOrd + Copy,
{
    /// Returns the key with the largest priority without removing it.
    pub(crate) fn peek_max(&self) -> Option<Key> {
        (self.size > 0).then(|| self.keys_by_position[0])
    }

    /// Removes the key with the largest priority and returns it.
    pub(crate) fn pop_max(&mut self) -> Option<Key> {
        let best = self.peek_max()?;
        self.delete_key(best);
        Some(best)
    }

    pub(crate) fn get_value(&self, key: Key) -> Value {
        self.priorities[self.position_of[key]]
    }

    /// Adds `amount` to the priority of `key`, whether or not it is currently in the heap.
    pub(crate) fn increment(&mut self, key: Key, amount: Value) {
        let position = self.position_of[key];
        self.priorities[position] += amount;
        if position < self.size {
            self.sift_up(position);
        }
    }

    /// Puts a key back into the heap. Does nothing if the key is already in the heap.
    pub(crate) fn restore_key(&mut self, key: Key) {
        if self.is_key_present(key) {
            return;
        }
        let position = self.position_of[key];
        self.swap(position, self.size);
        self.size += 1;
        self.sift_up(self.size - 1);
    }

    /// Takes a key out of the heap. Its priority is kept so that [`KeyValueHeap::restore_key`]
    /// brings it back where it belongs.
    pub(crate) fn delete_key(&mut self, key: Key) {
        if !self.is_key_present(key) {
            return;
        }
        let position = self.position_of[key];
        self.swap(position, self.size - 1);
        self.size -= 1;
        if position < self.size {
            self.sift_down(position);
        }
    }

    pub(crate) fn is_key_present(&self, key: Key) -> bool {
        key.index() < self.position_of.len() && self.position_of[key] < self.size
    }

    /// The number of keys known to the heap, including those currently taken out.
    pub(crate) fn len(&self) -> usize {
        self.priorities.len()
    }

    #[cfg(test)]
    pub(crate) fn num_present(&self) -> usize {
        self.size
    }

    /// Registers a new key with the given priority. Keys have to be added in index order.
    pub(crate) fn grow(&mut self, key: Key, value: Value) {
        gourd_assert_moderate!(key.index() == self.position_of.len());
        let position = self.priorities.len();
        self.priorities.push(value);
        self.keys_by_position.push(key);
        let _ = self.position_of.push(position);

        self.swap(self.size, position);
        self.size += 1;
        self.sift_up(self.size - 1);
    }

    /// Divides every priority, including those of keys which are taken out, by `divisor`.
    pub(crate) fn divide_values(&mut self, divisor: Value) {
        self.priorities
            .iter_mut()
            .for_each(|priority| *priority /= divisor);
    }

    fn swap(&mut self, a: usize, b: usize) {
        let key_a = self.keys_by_position[a];
        let key_b = self.keys_by_position[b];

        self.priorities.swap(a, b);
        self.keys_by_position.swap(a, b);
        self.position_of[key_a] = b;
        self.position_of[key_b] = a;
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.priorities[parent] >= self.priorities[position] {
                break;
            }
            self.swap(parent, position);
            position = parent;
        }
        gourd_assert_extreme!(self.is_heap());
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            if left >= self.size {
                break;
            }
            let right = left + 1;
            let largest_child = if right < self.size && self.priorities[right] > self.priorities[left]
            {
                right
            } else {
                left
            };

            if self.priorities[position] >= self.priorities[largest_child] {
                break;
            }
            self.swap(position, largest_child);
            position = largest_child;
        }
        gourd_assert_extreme!(self.is_heap());
    }

    fn is_heap(&self) -> bool {
        (1..self.size).all(|position| self.priorities[(position - 1) / 2] >= self.priorities[position])
    }
}

#[cfg(test)]
mod tests {
    use super::KeyValueHeap;

    fn heap_with(priorities: &[f64]) -> KeyValueHeap<usize, f64> {
        let mut heap = KeyValueHeap::default();
        for (key, &priority) in priorities.iter().enumerate() {
            heap.grow(key, priority);
        }
        heap
    }

    #[test]
    fn keys_are_popped_by_decreasing_priority() {
        let mut heap = heap_with(&[3.0, 9.0, 1.0, 5.0, 7.0]);

        let popped = std::iter::from_fn(|| heap.pop_max()).collect::<Vec<_>>();
        assert_eq!(popped, vec![1, 4, 3, 0, 2]);
        assert_eq!(heap.num_present(), 0);
        assert_eq!(heap.len(), 5);
    }

    #[test]
    fn increment_of_removed_key_is_kept_on_restore() {
        let mut heap = heap_with(&[1.0, 2.0, 3.0]);
        heap.delete_key(0);
        heap.increment(0, 10.0);

        assert_eq!(heap.peek_max(), Some(2));
        heap.restore_key(0);
        assert_eq!(heap.peek_max(), Some(0));
        assert_eq!(heap.get_value(0), 11.0);
    }

    #[test]
    fn restoring_a_present_key_does_nothing() {
        let mut heap = heap_with(&[1.0, 2.0]);
        heap.restore_key(1);
        assert_eq!(heap.num_present(), 2);
    }

    #[test]
    fn dividing_scales_every_priority() {
        let mut heap = heap_with(&[4.0, 8.0]);
        heap.delete_key(1);
        heap.divide_values(4.0);

        assert_eq!(heap.get_value(0), 1.0);
        assert_eq!(heap.get_value(1), 2.0);
    }
}
