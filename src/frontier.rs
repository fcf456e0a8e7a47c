//! Open-set containers for the A* search.
//!
//! Both implementations break ties on equal scores the same way: the cell that
//! entered the frontier first wins. An update keeps a cell's original place in
//! line, so swapping one frontier for the other never changes the returned path.

use crate::cell::CellId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Frontier of cells waiting to be expanded, keyed by f-score
pub trait Frontier {
    /// Insert `id` with `score`, or overwrite its score if already present
    fn insert_or_update(&mut self, id: CellId, score: f64);

    /// Remove and return the cell with the lowest score
    fn extract_min(&mut self) -> Option<CellId>;

    fn contains(&self, id: CellId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which frontier implementation the search should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierKind {
    /// Linear scan over an insertion-ordered list
    #[default]
    Scan,
    /// Binary heap with lazy invalidation
    Heap,
}

/// Insertion-ordered list with a linear-scan minimum, O(n) per extraction
#[derive(Debug, Default)]
pub struct ScanFrontier {
    entries: Vec<(CellId, f64)>,
}

impl ScanFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for ScanFrontier {
    fn insert_or_update(&mut self, id: CellId, score: f64) {
        match self.entries.iter_mut().find(|(entry, _)| *entry == id) {
            Some((_, existing)) => *existing = score,
            None => self.entries.push((id, score)),
        }
    }

    fn extract_min(&mut self) -> Option<CellId> {
        let mut lowest: Option<usize> = None;
        for (i, (_, score)) in self.entries.iter().enumerate() {
            match lowest {
                Some(l) if *score >= self.entries[l].1 => {}
                _ => lowest = Some(i),
            }
        }
        // `remove` keeps the remaining entries in insertion order
        lowest.map(|i| self.entries.remove(i).0)
    }

    fn contains(&self, id: CellId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A scored entry in the heap
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    id: CellId,
    score: f64,
    seq: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            // Tie-breaker: earlier insertion first
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Binary heap frontier, O(log n) per operation.
///
/// Updates push a fresh entry and leave the old one in the heap; stale entries
/// are skipped on extraction by checking them against `live`.
#[derive(Debug, Default)]
pub struct HeapFrontier {
    heap: BinaryHeap<HeapEntry>,
    /// Current (score, first-insertion sequence) of every cell still in the frontier
    live: HashMap<CellId, (f64, u64)>,
    next_seq: u64,
}

impl HeapFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for HeapFrontier {
    fn insert_or_update(&mut self, id: CellId, score: f64) {
        let seq = match self.live.get(&id) {
            Some(&(_, seq)) => seq,
            None => {
                self.next_seq += 1;
                self.next_seq
            }
        };
        self.live.insert(id, (score, seq));
        self.heap.push(HeapEntry { id, score, seq });
    }

    fn extract_min(&mut self) -> Option<CellId> {
        while let Some(entry) = self.heap.pop() {
            if self.live.get(&entry.id) == Some(&(entry.score, entry.seq)) {
                self.live.remove(&entry.id);
                return Some(entry.id);
            }
        }
        None
    }

    fn contains(&self, id: CellId) -> bool {
        self.live.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}
