use super::{Frontier, SearchState};

/// Last-in-first-out frontier, used by iterative-deepening depth-first
/// search to explore one branch to its depth limit before backtracking.
///
/// Bounded eviction drops the bottom of the stack (the state that would be
/// popped last), since the top holds whatever the search is currently
/// committed to exploring.
pub struct LifoFrontier {
    stack: Vec<SearchState>,
    max_size: Option<usize>,
}

impl LifoFrontier {
    pub fn new() -> Self {
        LifoFrontier {
            stack: Vec::new(),
            max_size: None,
        }
    }

    pub fn bounded(max_size: usize) -> Self {
        LifoFrontier {
            stack: Vec::new(),
            max_size: Some(max_size),
        }
    }
}

impl Default for LifoFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, state: SearchState) {
        if let Some(max_size) = self.max_size {
            if self.stack.len() >= max_size {
                self.stack.remove(0);
            }
        }
        self.stack.push(state);
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}
