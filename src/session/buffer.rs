use std::collections::VecDeque;

/// Ordered sequence with a fixed maximum length.
///
/// Pushing onto a full buffer evicts exactly one item, the oldest, so the
/// length never exceeds `capacity` after any call returns.
#[derive(Debug, Clone)]
pub struct BoundedBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append an item, returning the evicted oldest item if the bound was hit
    pub fn push(&mut self, item: T) -> Option<T> {
        self.items.push_back(item);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> BoundedBuffer<T> {
    /// Copy out the retained items, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
