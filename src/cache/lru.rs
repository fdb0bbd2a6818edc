//! Recency List Module
//!
//! Arena-backed doubly-linked list that orders a shard's keys by recency.

// == Node Id ==
/// Handle to a node inside a [`RecencyList`] arena.
///
/// Freed slots are recycled, so an id also carries the generation of the
/// slot it was issued for. Once its node is unlinked the id goes stale and
/// every lookup through it misses, even after the slot holds another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

/// Null link marker.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node {
    key: String,
    prev: usize,
    next: usize,
}

#[derive(Debug)]
struct Slot {
    /// Bumped every time the slot is freed
    generation: u64,
    node: Option<Node>,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Keys are linked through index-addressed nodes where:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Every operation that takes a [`NodeId`] is O(1); no operation scans.
#[derive(Debug)]
pub struct RecencyList {
    /// Node storage, a slot without a node is free
    slots: Vec<Slot>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Links a new key at the most recently used end and returns its id.
    pub fn push_front(&mut self, key: String) -> NodeId {
        let node = Node {
            key,
            prev: NIL,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx].node = Some(node);
                idx
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        if self.head != NIL {
            self.node_mut(self.head).prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
        self.len += 1;

        self.id_at(idx)
    }

    // == Move To Front ==
    /// Marks a node as most recently used. Stale ids are ignored.
    pub fn move_to_front(&mut self, id: NodeId) {
        let Some(idx) = self.resolve(id) else {
            return;
        };
        if self.head == idx {
            return;
        }

        self.detach(idx);

        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.node_mut(old_head).prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    // == Remove ==
    /// Unlinks a node and returns its key.
    ///
    /// Returns None if the id is stale; the id itself goes stale on success.
    pub fn remove(&mut self, id: NodeId) -> Option<String> {
        let idx = self.resolve(id)?;

        self.detach(idx);
        let slot = &mut self.slots[idx];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Back ==
    /// Unlinks and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<String> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.id_at(self.tail))
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    pub fn peek_back(&self) -> Option<&str> {
        self.node(self.tail).map(|node| node.key.as_str())
    }

    /// Returns the key stored at `id`, if the id is still live.
    pub fn key(&self, id: NodeId) -> Option<&str> {
        let idx = self.resolve(id)?;
        self.node(idx).map(|node| node.key.as_str())
    }

    // == Iteration ==
    /// Iterates `(id, key)` pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Clear ==
    /// Unlinks every node. Ids issued before the clear all go stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(idx);
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of linked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Splices a node out of the chain without freeing its slot.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev, node.next)
        };

        if prev != NIL {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// Maps an id to its slot index if the slot is live and of the same generation.
    fn resolve(&self, id: NodeId) -> Option<usize> {
        let slot = self.slots.get(id.index)?;
        (slot.generation == id.generation && slot.node.is_some()).then_some(id.index)
    }

    fn id_at(&self, idx: usize) -> NodeId {
        NodeId {
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node> {
        self.slots.get(idx).and_then(|slot| slot.node.as_ref())
    }

    // Linked indices always point at live slots.
    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match self.slots.get_mut(idx).and_then(|slot| slot.node.as_mut()) {
            Some(node) => node,
            None => unreachable!("recency link {} points at a free slot", idx),
        }
    }
}

// == Iterator ==
/// MRU → LRU iterator over a [`RecencyList`].
pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: usize,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        // The remaining counter bounds the walk even if links were corrupted.
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.cursor)?;
        let item = (self.list.id_at(self.cursor), node.key.as_str());
        self.cursor = node.next;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
