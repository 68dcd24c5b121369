use std::collections::VecDeque;

use crate::event::InputEvent;

/// Event queue with mouse-move coalescing.
///
/// Consecutive cursor moves collapse into the latest one. A move that
/// arrives after a button, key or wheel event starts a new entry, so the
/// relative order of pointer positions and clicks is preserved.
pub struct EventQueue {
    pending: VecDeque<InputEvent>,
    stats: EventStats,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(64),
            stats: EventStats::default(),
        }
    }

    /// Push event to queue (called from the host's native event handler).
    pub fn push(&mut self, event: InputEvent) {
        self.stats.events_received += 1;

        if let InputEvent::MouseMoved { .. } = event {
            if let Some(last @ InputEvent::MouseMoved { .. }) = self.pending.back_mut() {
                *last = event;
                self.stats.events_coalesced += 1;
                return;
            }
        }

        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending event as a batch.
    pub fn drain(&mut self) -> EventBatch {
        let events: Vec<InputEvent> = self.pending.drain(..).collect();
        self.stats.events_processed += events.len();
        EventBatch { events }
    }

    pub fn stats(&self) -> &EventStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EventStats::default();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A drained set of events, handed from consumer to consumer.
#[derive(Debug, Default)]
pub struct EventBatch {
    events: Vec<InputEvent>,
}

impl EventBatch {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Run `handler` over every event, keeping only the unconsumed ones.
    pub fn dispatch<H>(&mut self, mut handler: H)
    where
        H: FnMut(&InputEvent) -> HandleStatus,
    {
        self.events.retain(|event| {
            let status = handler(event);
            !status.is_consumed()
        });
    }

    pub fn into_inner(self) -> Vec<InputEvent> {
        self.events
    }
}

impl From<Vec<InputEvent>> for EventBatch {
    fn from(events: Vec<InputEvent>) -> Self {
        Self::new(events)
    }
}

#[derive(Default, Debug, Clone)]
pub struct EventStats {
    pub events_received: usize,
    pub events_processed: usize,
    pub events_coalesced: usize,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleStatus: u8 {
        const HANDLED = 0b00000001;
        const CONSUMED = 0b00000010;
    }
}

impl HandleStatus {
    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn consumed() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::CONSUMED.bits())
    }

    pub const fn handled() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }

    /// `consumed()` when `consumed` is true, `ignored()` otherwise.
    pub const fn from_consumed(consumed: bool) -> Self {
        if consumed {
            Self::consumed()
        } else {
            Self::ignored()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    #[test]
    fn test_consecutive_moves_coalesce() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::mouse_move(1.0, 1.0));
        queue.push(InputEvent::mouse_move(2.0, 2.0));
        queue.push(InputEvent::mouse_move(3.0, 3.0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.stats().events_coalesced, 2);

        let batch = queue.drain();
        assert_eq!(
            batch.into_inner(),
            vec![InputEvent::mouse_move(3.0, 3.0)]
        );
    }

    #[test]
    fn test_moves_do_not_cross_clicks() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::mouse_move(1.0, 1.0));
        queue.push(InputEvent::mouse_down(MouseButton::Left, 1.0, 1.0));
        queue.push(InputEvent::mouse_move(5.0, 5.0));
        queue.push(InputEvent::mouse_move(6.0, 6.0));

        let events = queue.drain().into_inner();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], InputEvent::mouse_move(6.0, 6.0));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dispatch_retains_unconsumed() {
        let mut batch = EventBatch::new(vec![
            InputEvent::mouse_move(0.0, 0.0),
            InputEvent::text("x"),
        ]);
        batch.dispatch(|event| HandleStatus::from_consumed(event.is_pointer()));
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.iter().next(), Some(&InputEvent::text("x")));
    }
}
