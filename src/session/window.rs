//! Fixed-capacity rolling window for RUL estimation.

use std::collections::VecDeque;

/// Keeps the most recent `capacity` entries, evicting the oldest first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create an empty window. `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Append an entry, dropping the oldest if the window is full.
    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// The window as it would look after `push(next)`, without mutating it.
    pub fn with_next<'a>(&'a self, next: &'a T) -> impl Iterator<Item = &'a T> {
        let evict = usize::from(self.is_full());
        self.entries.iter().skip(evict).chain(std::iter::once(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut window = RollingWindow::new(3);
        for i in 0..5 {
            window.push(i);
        }
        assert_eq!(window.len(), 3);
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_with_next_matches_push() {
        let mut window = RollingWindow::new(3);
        window.push(1);
        window.push(2);

        let preview: Vec<i32> = window.with_next(&3).copied().collect();
        assert_eq!(preview, vec![1, 2, 3]);
        assert_eq!(window.len(), 2);

        window.push(3);
        let preview: Vec<i32> = window.with_next(&4).copied().collect();
        window.push(4);
        assert_eq!(preview, window.iter().copied().collect::<Vec<_>>());
        assert_eq!(preview, vec![2, 3, 4]);
    }

    #[test]
    fn test_is_full() {
        let mut window = RollingWindow::new(2);
        assert!(window.is_empty());
        window.push('a');
        assert!(!window.is_full());
        window.push('b');
        assert!(window.is_full());
        assert_eq!(window.capacity(), 2);
    }
}
