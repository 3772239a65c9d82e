//! Navigation stack for drilldown.
//!
//! The stack is never empty: the first entry is the root region and the last
//! entry is the region currently on screen.

use serde::Serialize;

use crate::region::RegionKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationStack {
    keys: Vec<RegionKey>,
}

impl NavigationStack {
    pub fn new(root: RegionKey) -> Self {
        Self { keys: vec![root] }
    }

    pub fn root(&self) -> RegionKey {
        self.keys[0]
    }

    pub fn current(&self) -> RegionKey {
        // Invariant: non-empty.
        self.keys[self.keys.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_at_root(&self) -> bool {
        self.keys.len() == 1
    }

    pub fn keys(&self) -> &[RegionKey] {
        &self.keys
    }

    /// Push a key. Returns false (and leaves the stack alone) when the key is
    /// already on top.
    pub fn push(&mut self, key: RegionKey) -> bool {
        if self.current() == key {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Pop the current entry, returning the new top. The root is never popped.
    pub fn pop(&mut self) -> Option<RegionKey> {
        if self.is_at_root() {
            return None;
        }
        self.keys.pop();
        Some(self.current())
    }

    /// Breadcrumb label, e.g. `World / India / Gujarat`.
    pub fn breadcrumb(&self) -> String {
        self.keys
            .iter()
            .map(|k| k.label())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_root() {
        let stack = NavigationStack::new(RegionKey::World);
        assert_eq!(stack.keys(), &[RegionKey::World]);
        assert_eq!(stack.current(), RegionKey::World);
        assert!(stack.is_at_root());
        assert!(!stack.is_empty());
    }

    #[test]
    fn push_and_pop() {
        let mut stack = NavigationStack::new(RegionKey::World);
        assert!(stack.push(RegionKey::India));
        assert!(stack.push(RegionKey::Gujarat));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(RegionKey::India));
        assert_eq!(stack.pop(), Some(RegionKey::World));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.keys(), &[RegionKey::World]);
    }

    #[test]
    fn consecutive_duplicate_is_not_pushed() {
        let mut stack = NavigationStack::new(RegionKey::World);
        assert!(!stack.push(RegionKey::World));
        assert!(stack.push(RegionKey::India));
        assert!(!stack.push(RegionKey::India));
        assert_eq!(stack.keys(), &[RegionKey::World, RegionKey::India]);
    }

    #[test]
    fn breadcrumb_uses_labels() {
        let mut stack = NavigationStack::new(RegionKey::World);
        assert_eq!(stack.breadcrumb(), "World");
        stack.push(RegionKey::India);
        stack.push(RegionKey::Gujarat);
        assert_eq!(stack.breadcrumb(), "World / India / Gujarat");
    }
}
