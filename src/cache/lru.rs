//! LRU List Module
//!
//! Implements the recency order used for LRU eviction.

use crate::cache::CacheEntry;

/// Stable handle to a node inside an [`LruList`].
pub type SlotId = usize;

#[derive(Debug)]
struct Node<V> {
    entry: CacheEntry<V>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == LRU List ==
/// Doubly linked list of cache entries ordered by access time.
///
/// Nodes live in a vector of slots and link to each other by index:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Removed slots go on a free list and are reused by later inserts, so a
/// `SlotId` stays valid until its entry is removed.
#[derive(Debug)]
pub struct LruList<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<V> Default for LruList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LruList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its handle.
    pub fn push_front(&mut self, entry: CacheEntry<V>) -> SlotId {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_front(id);
        self.len += 1;
        id
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) || self.node(id).is_none() {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    // == Remove ==
    /// Removes a node and returns its entry.
    pub fn remove(&mut self, id: SlotId) -> Option<CacheEntry<V>> {
        self.node(id)?;
        self.unlink(id);
        let node = self.slots.get_mut(id)?.take()?;
        self.free.push(id);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<CacheEntry<V>> {
        let id = self.tail?;
        self.remove(id)
    }

    // == Peek Back ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_back(&self) -> Option<&CacheEntry<V>> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&CacheEntry<V>> {
        self.node(id).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut CacheEntry<V>> {
        self.node_mut(id).map(|node| &mut node.entry)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry<V>> + '_ {
        std::iter::successors(self.head, move |&id| self.node(id).and_then(|node| node.next))
            .filter_map(move |id| self.get(id))
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every node and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn node(&self, id: SlotId) -> Option<&Node<V>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<V>> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    /// Attaches a detached node at the front.
    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(head) = old_head.and_then(|h| self.node_mut(h)) {
            head.prev = Some(id);
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
    }

    /// Detaches a node from its neighbours, leaving it in its slot.
    fn unlink(&mut self, id: SlotId) {
        let Some((prev, next)) = self.node(id).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev.and_then(|p| self.node_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn entry(key: &str) -> CacheEntry<u32> {
        CacheEntry::new(key.to_string(), 0, Duration::from_secs(60), Instant::now())
    }

    fn keys(list: &LruList<u32>) -> Vec<String> {
        list.iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_lru_new() {
        let list: LruList<u32> = LruList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.peek_back().is_none());
    }

    #[test]
    fn test_lru_push_front_order() {
        let mut list = LruList::new();
        list.push_front(entry("key1"));
        list.push_front(entry("key2"));
        list.push_front(entry("key3"));

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.peek_back().map(|e| e.key.as_str()), Some("key1"));
    }

    #[test]
    fn test_lru_move_to_front() {
        let mut list = LruList::new();
        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.push_front(entry("c"));

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_back().map(|e| e.key.as_str()), Some("b"));
    }

    #[test]
    fn test_lru_move_middle_and_head() {
        let mut list = LruList::new();
        list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        let c = list.push_front(entry("c"));

        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        // Already at front: no change
        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        list.move_to_front(c);
        assert_eq!(keys(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_lru_pop_back() {
        let mut list = LruList::new();
        list.push_front(entry("key1"));
        list.push_front(entry("key2"));
        list.push_front(entry("key3"));

        assert_eq!(list.pop_back().map(|e| e.key), Some("key1".to_string()));
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back().map(|e| e.key), Some("key2".to_string()));
        assert_eq!(list.pop_back().map(|e| e.key), Some("key3".to_string()));
        assert!(list.pop_back().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_lru_remove_middle() {
        let mut list = LruList::new();
        list.push_front(entry("key1"));
        let key2 = list.push_front(entry("key2"));
        list.push_front(entry("key3"));

        let removed = list.remove(key2);

        assert_eq!(removed.map(|e| e.key), Some("key2".to_string()));
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec!["key3", "key1"]);
        assert!(list.get(key2).is_none());
    }

    #[test]
    fn test_lru_remove_twice_is_noop() {
        let mut list = LruList::new();
        let id = list.push_front(entry("key1"));

        assert!(list.remove(id).is_some());
        assert!(list.remove(id).is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_lru_reuses_freed_slots() {
        let mut list = LruList::new();
        let first = list.push_front(entry("a"));
        list.push_front(entry("b"));

        list.remove(first);
        let reused = list.push_front(entry("c"));

        assert_eq!(reused, first);
        assert_eq!(keys(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut list = LruList::new();
        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        let c = list.push_front(entry("c"));

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        assert_eq!(list.pop_back().map(|e| e.key), Some("a".to_string()));
        assert_eq!(list.pop_back().map(|e| e.key), Some("c".to_string()));
        assert_eq!(list.pop_back().map(|e| e.key), Some("b".to_string()));
    }

    #[test]
    fn test_lru_get_mut() {
        let mut list = LruList::new();
        let id = list.push_front(entry("a"));

        if let Some(e) = list.get_mut(id) {
            e.value = 42;
        }

        assert_eq!(list.get(id).map(|e| e.value), Some(42));
    }

    #[test]
    fn test_lru_clear() {
        let mut list = LruList::new();
        list.push_front(entry("a"));
        list.push_front(entry("b"));

        list.clear();

        assert!(list.is_empty());
        assert!(list.peek_back().is_none());
        assert_eq!(list.iter().count(), 0);

        list.push_front(entry("c"));
        assert_eq!(keys(&list), vec!["c"]);
    }
}
