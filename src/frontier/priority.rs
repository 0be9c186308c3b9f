use super::{Frontier, SearchState};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Orders entries so that `BinaryHeap`, which is a max-heap, pops the
/// *lowest* score first: comparison is reversed relative to the natural
/// order of `score`, and insertion order breaks exact ties so that equally
/// good states are still expanded deterministically (push order).
struct ScoredState {
    state: SearchState,
    sequence: u64,
}

impl PartialEq for ScoredState {
    fn eq(&self, other: &Self) -> bool {
        self.state.score == other.state.score && self.sequence == other.sequence
    }
}
impl Eq for ScoredState {}

impl Ord for ScoredState {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .state
            .score
            .partial_cmp(&self.state.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for ScoredState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier ordered by [`SearchState::score`], used by
/// uniform-cost search, A*, and informed bidirectional search.
///
/// Bounded eviction removes the single highest-score (least promising)
/// entry, which for a `BinaryHeap` built to pop the minimum means a linear
/// scan: frontiers here stay in the thousands of entries, not millions, so
/// this is simpler and cheap enough rather than reaching for a fancier
/// bounded-heap structure.
pub struct PriorityFrontier {
    heap: BinaryHeap<ScoredState>,
    max_size: Option<usize>,
    next_sequence: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            max_size: None,
            next_sequence: 0,
        }
    }

    pub fn bounded(max_size: usize) -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            max_size: Some(max_size),
            next_sequence: 0,
        }
    }

    fn evict_worst(&mut self) {
        if self.heap.is_empty() {
            return;
        }
        let mut worst_idx_score: Option<(f64, u64)> = None;
        for entry in self.heap.iter() {
            let key = (entry.state.score, entry.sequence);
            if worst_idx_score
                .map(|(score, seq)| key.0 > score || (key.0 == score && key.1 > seq))
                .unwrap_or(true)
            {
                worst_idx_score = Some(key);
            }
        }
        if let Some((score, sequence)) = worst_idx_score {
            let items: Vec<ScoredState> = std::mem::take(&mut self.heap).into_vec();
            self.heap = items
                .into_iter()
                .filter(|e| !(e.state.score == score && e.sequence == sequence))
                .collect();
        }
    }
}

impl Default for PriorityFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, state: SearchState) {
        if let Some(max_size) = self.max_size {
            if self.heap.len() >= max_size {
                self.evict_worst();
            }
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScoredState { state, sequence });
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|entry| entry.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageId;

    fn scored(title: &str, score: f64) -> SearchState {
        let mut state = SearchState::root(PageId::parse(title).unwrap());
        state.score = score;
        state
    }

    #[test]
    fn pops_lowest_score_first() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(scored("A", 5.0));
        frontier.push(scored("B", 1.0));
        frontier.push(scored("C", 3.0));
        assert_eq!(frontier.pop().unwrap().node.title(), "B");
        assert_eq!(frontier.pop().unwrap().node.title(), "C");
        assert_eq!(frontier.pop().unwrap().node.title(), "A");
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(scored("A", 1.0));
        frontier.push(scored("B", 1.0));
        assert_eq!(frontier.pop().unwrap().node.title(), "A");
        assert_eq!(frontier.pop().unwrap().node.title(), "B");
    }

    #[test]
    fn bounded_frontier_evicts_the_worst_score() {
        let mut frontier = PriorityFrontier::bounded(2);
        frontier.push(scored("A", 1.0));
        frontier.push(scored("B", 5.0));
        frontier.push(scored("C", 2.0));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop().unwrap().node.title(), "A");
        assert_eq!(frontier.pop().unwrap().node.title(), "C");
    }
}
