use std::collections::VecDeque;
use std::sync::Arc;

use floorplan_shared::ActionEvent;
use tokio::sync::RwLock;

pub const DEFAULT_HISTORY: usize = 5000;
pub const DEFAULT_CONTEXT: usize = 20;
pub const MAX_POINTS_PER_EVENT: usize = 5000;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ActionStore>>,
    pub predictor: Arc<RwLock<PredictorState>>,
    pub context: usize,
}

impl AppState {
    pub fn new(history: usize, context: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(ActionStore::new(history))),
            predictor: Arc::new(RwLock::new(PredictorState::default())),
            context: context.max(1),
        }
    }
}

/// Most recent events, oldest dropped first once `max_len` is reached.
pub struct ActionStore {
    events: VecDeque<ActionEvent>,
    max_len: usize,
}

impl ActionStore {
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            events: VecDeque::with_capacity(max_len.min(1024)),
            max_len,
        }
    }

    pub fn add(&mut self, event: ActionEvent) {
        if self.events.len() == self.max_len {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn last(&self, count: usize) -> Vec<ActionEvent> {
        let skip = self.events.len().saturating_sub(count);
        self.events.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[derive(Default)]
pub struct PredictorState {
    pub current_id: Option<String>,
    pub accepted: u64,
    pub total_reward: i64,
}

#[cfg(test)]
mod tests {
    use floorplan_shared::ActionKind;

    use super::*;

    fn event(timestamp: f64) -> ActionEvent {
        ActionEvent {
            action: ActionKind::PathSegment,
            coords: vec![[0.5, 0.5]],
            timestamp,
        }
    }

    #[test]
    fn store_drops_oldest_when_full() {
        let mut store = ActionStore::new(3);
        for t in 0..5 {
            store.add(event(t as f64));
        }
        assert_eq!(store.len(), 3);
        let stamps: Vec<f64> = store.last(10).iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![2.0, 3.0, 4.0]);
        let stamps: Vec<f64> = store.last(2).iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![3.0, 4.0]);
    }
}
