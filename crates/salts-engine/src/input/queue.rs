use std::collections::VecDeque;

use crate::api::types::Movement;

/// Raw device events as the host delivers them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A mouse button went down at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
}

/// A queue of raw input events.
/// The host pushes events as they arrive; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Game actions produced from raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Move(Movement),
    StopMove(Movement),
    /// Attack toward a screen-space point.
    Attack { x: f32, y: f32 },
    /// Rebuild the current level (debug).
    Reset,
    /// Freeze or thaw the level (debug).
    ToggleFreeze,
}

/// Bounded FIFO of intents, drained synchronously once per frame.
///
/// Overflow drops the new intent instead of blocking the frame. Draining
/// handles up to `soft_cap` intents; a backlog of more than twice the cap
/// is flushed in one go.
pub struct IntentQueue {
    intents: VecDeque<Intent>,
    capacity: usize,
    soft_cap: usize,
}

impl IntentQueue {
    pub fn new(capacity: usize, soft_cap: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            intents: VecDeque::with_capacity(capacity),
            capacity,
            soft_cap: soft_cap.max(1),
        }
    }

    /// Enqueue an intent. Returns false (and drops it) when full.
    pub fn push(&mut self, intent: Intent) -> bool {
        if self.intents.len() >= self.capacity {
            log::warn!("intent queue full ({}), dropping {:?}", self.capacity, intent);
            return false;
        }
        self.intents.push_back(intent);
        true
    }

    /// Take this frame's intents in arrival order.
    pub fn drain_frame(&mut self) -> Vec<Intent> {
        let pending = self.intents.len();
        let take = if pending < self.soft_cap {
            pending
        } else if pending <= self.soft_cap * 2 {
            log::warn!("intent backlog {}, handling {} this frame", pending, self.soft_cap);
            self.soft_cap
        } else {
            log::warn!("intent backlog {} over twice the cap, flushing", pending);
            pending
        };
        self.intents.drain(..take).collect()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(queue: &mut IntentQueue, n: usize) {
        for _ in 0..n {
            queue.push(Intent::Move(Movement::Right));
        }
    }

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn small_backlog_drains_fully_in_order() {
        let mut q = IntentQueue::new(64, 10);
        q.push(Intent::Move(Movement::Left));
        q.push(Intent::Reset);
        assert_eq!(q.drain_frame(), vec![Intent::Move(Movement::Left), Intent::Reset]);
        assert!(q.is_empty());
    }

    #[test]
    fn moderate_backlog_is_capped() {
        let mut q = IntentQueue::new(64, 10);
        fill(&mut q, 15);
        assert_eq!(q.drain_frame().len(), 10);
        assert_eq!(q.len(), 5);
        assert_eq!(q.drain_frame().len(), 5);
    }

    #[test]
    fn large_backlog_is_flushed() {
        let mut q = IntentQueue::new(64, 10);
        fill(&mut q, 25);
        assert_eq!(q.drain_frame().len(), 25);
        assert!(q.is_empty());
    }

    #[test]
    fn overflow_drops_newest() {
        let mut q = IntentQueue::new(3, 10);
        assert!(q.push(Intent::Reset));
        assert!(q.push(Intent::Reset));
        assert!(q.push(Intent::Reset));
        assert!(!q.push(Intent::ToggleFreeze));
        assert_eq!(q.len(), 3);
        assert!(!q.drain_frame().contains(&Intent::ToggleFreeze));
    }
}
