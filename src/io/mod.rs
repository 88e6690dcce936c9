// Purpose - host/UI bridge: cursor events in, telemetry out

use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CursorEvent {
    /// Pin the cursor to a position and stop autonomous motion.
    Override { x: f32, y: f32 },
    /// Resume autonomous motion from wherever the cursor was left.
    Release,
    UiAttached,
    UiDetached,
}

/// An event with its sample offset inside the current block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimedEvent {
    pub frame: u32,
    pub event: CursorEvent,
}

impl TimedEvent {
    pub fn new(frame: u32, event: CursorEvent) -> Self {
        Self { frame, event }
    }
}

/// Source of timed events for one block, drained in arrival order.
pub trait EventReceiver {
    fn pop(&mut self) -> Option<TimedEvent>;
}

impl EventReceiver for std::slice::Iter<'_, TimedEvent> {
    fn pop(&mut self) -> Option<TimedEvent> {
        self.next().copied()
    }
}

impl EventReceiver for VecDeque<TimedEvent> {
    fn pop(&mut self) -> Option<TimedEvent> {
        self.pop_front()
    }
}

/// For blocks with no event input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventReceiver for NoEvents {
    fn pop(&mut self) -> Option<TimedEvent> {
        None
    }
}

#[cfg(feature = "rtrb")]
impl EventReceiver for Consumer<TimedEvent> {
    fn pop(&mut self) -> Option<TimedEvent> {
        Consumer::pop(self).ok()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorPosition {
    pub x: f32,
    pub y: f32,
}

/// Where per-block cursor telemetry goes. Sending must never block; a full
/// channel drops the update.
pub trait TelemetrySink {
    fn send(&mut self, position: CursorPosition);
}

impl TelemetrySink for Vec<CursorPosition> {
    fn send(&mut self, position: CursorPosition) {
        self.push(position);
    }
}

#[cfg(feature = "rtrb")]
impl TelemetrySink for Producer<CursorPosition> {
    fn send(&mut self, position: CursorPosition) {
        let _ = self.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_receiver_yields_in_order() {
        let events = [
            TimedEvent::new(3, CursorEvent::Override { x: 0.1, y: 0.2 }),
            TimedEvent::new(9, CursorEvent::Release),
        ];
        let mut rx = events.iter();
        assert_eq!(rx.pop(), Some(events[0]));
        assert_eq!(rx.pop(), Some(events[1]));
        assert_eq!(rx.pop(), None);
    }

    #[test]
    fn no_events_is_empty() {
        assert_eq!(NoEvents.pop(), None);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_buffer_round_trip() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<TimedEvent>::new(4);
        assert!(tx.push(TimedEvent::new(0, CursorEvent::UiAttached)).is_ok());
        assert_eq!(EventReceiver::pop(&mut rx), Some(TimedEvent::new(0, CursorEvent::UiAttached)));
        assert_eq!(EventReceiver::pop(&mut rx), None);
    }

    #[test]
    fn vec_sink_collects_every_update() {
        let mut sink: Vec<CursorPosition> = Vec::new();
        sink.send(CursorPosition { x: 0.1, y: 0.2 });
        sink.send(CursorPosition { x: 0.3, y: 0.4 });
        assert_eq!(
            sink,
            vec![CursorPosition { x: 0.1, y: 0.2 }, CursorPosition { x: 0.3, y: 0.4 }]
        );
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn full_telemetry_channel_drops_updates() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<CursorPosition>::new(1);
        tx.send(CursorPosition { x: 0.1, y: 0.1 });
        tx.send(CursorPosition { x: 0.9, y: 0.9 });
        assert_eq!(rx.pop().ok(), Some(CursorPosition { x: 0.1, y: 0.1 }));
        assert!(rx.pop().is_err());
    }
}
