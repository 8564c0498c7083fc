//! Event queue feeding the tracker from the terminal event loop.

use crate::platform::{EventSource, PageEvent, Subscription, Timer};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Queues page events for the subscribed tracker and releases frames and timers on time.
pub struct EventQueue {
    subscription: Option<Subscription>,
    next_subscription: u64,
    pending: VecDeque<PageEvent>,
    frame_requested: bool,
    last_frame: Option<Instant>,
    frame_interval: Duration,
    timers: Vec<(Instant, Timer)>,
    now: Instant,
}

impl EventQueue {
    #[must_use]
    /// Creates an unsubscribed queue whose clock starts at `now`.
    pub fn new(frame_interval: Duration, now: Instant) -> Self {
        Self {
            subscription: None,
            next_subscription: 0,
            pending: VecDeque::new(),
            frame_requested: false,
            last_frame: None,
            frame_interval,
            timers: Vec::new(),
            now,
        }
    }

    /// Queues an event from the terminal. Dropped when nobody is subscribed.
    pub fn push(&mut self, event: PageEvent) {
        if self.subscription.is_some() {
            self.pending.push_back(event);
        }
    }

    /// Moves the clock to `now`, releasing due timers and, at most once per frame interval, the
    /// requested frame.
    pub fn advance_to(&mut self, now: Instant) {
        self.now = now;

        let mut due: Vec<(Instant, Timer)> = Vec::new();
        self.timers.retain(|&(deadline, timer)| {
            if deadline <= now {
                due.push((deadline, timer));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        self.pending
            .extend(due.into_iter().map(|(_, timer)| PageEvent::Timer(timer)));

        if self.frame_requested && self.frame_ready(now) {
            self.frame_requested = false;
            self.last_frame = Some(now);
            self.pending.push_back(PageEvent::Frame);
        }
    }

    /// Takes every released event in arrival order.
    pub fn drain(&mut self) -> Vec<PageEvent> {
        self.pending.drain(..).collect()
    }

    #[must_use]
    /// Time until the next timer or frame is due, if any is outstanding.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        let frame = self.frame_requested.then(|| {
            self.last_frame.map_or(Duration::ZERO, |last| {
                (last + self.frame_interval).saturating_duration_since(now)
            })
        });
        let timer = self
            .timers
            .iter()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
            .min();
        match (frame, timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    #[must_use]
    /// Whether a tracker is subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    fn frame_ready(&self, now: Instant) -> bool {
        self.last_frame
            .is_none_or(|last| now.saturating_duration_since(last) >= self.frame_interval)
    }
}

impl EventSource for EventQueue {
    fn subscribe(&mut self) -> Subscription {
        self.next_subscription += 1;
        let subscription = Subscription(self.next_subscription);
        self.subscription = Some(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        if self.subscription == Some(subscription) {
            self.subscription = None;
            self.pending.clear();
            self.timers.clear();
            self.frame_requested = false;
        }
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn schedule(&mut self, delay: Duration, timer: Timer) {
        self.timers.push((self.now + delay, timer));
    }
}

#[cfg(test)]
mod tests {
    use super::EventQueue;
    use crate::platform::{EventSource, PageEvent, Timer};
    use std::time::{Duration, Instant};

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_events_dropped_without_subscriber() {
        let mut queue = EventQueue::new(FRAME, Instant::now());
        queue.push(PageEvent::Scroll);
        assert!(queue.drain().is_empty());

        queue.subscribe();
        queue.push(PageEvent::Scroll);
        assert_eq!(queue.drain(), vec![PageEvent::Scroll]);
    }

    #[test]
    fn test_timers_release_when_due() {
        let start = Instant::now();
        let mut queue = EventQueue::new(FRAME, start);
        queue.subscribe();
        queue.schedule(Duration::from_millis(500), Timer::Settle);
        queue.schedule(Duration::from_millis(100), Timer::InitialCheck);
        assert_eq!(
            queue.time_until_next(start),
            Some(Duration::from_millis(100))
        );

        queue.advance_to(start + Duration::from_millis(99));
        assert!(queue.drain().is_empty());

        queue.advance_to(start + Duration::from_millis(600));
        assert_eq!(
            queue.drain(),
            vec![
                PageEvent::Timer(Timer::InitialCheck),
                PageEvent::Timer(Timer::Settle)
            ]
        );
    }

    #[test]
    fn test_frames_are_rate_limited() {
        let start = Instant::now();
        let mut queue = EventQueue::new(FRAME, start);
        queue.subscribe();

        queue.request_frame();
        queue.request_frame();
        queue.advance_to(start);
        assert_eq!(queue.drain(), vec![PageEvent::Frame]);

        queue.request_frame();
        queue.advance_to(start + Duration::from_millis(5));
        assert!(queue.drain().is_empty());
        assert_eq!(
            queue.time_until_next(start + Duration::from_millis(5)),
            Some(Duration::from_millis(11))
        );
        queue.advance_to(start + FRAME);
        assert_eq!(queue.drain(), vec![PageEvent::Frame]);
    }

    #[test]
    fn test_unsubscribe_clears_outstanding_work() {
        let start = Instant::now();
        let mut queue = EventQueue::new(FRAME, start);
        let subscription = queue.subscribe();
        queue.schedule(Duration::from_millis(10), Timer::Settle);
        queue.request_frame();
        queue.unsubscribe(subscription);
        queue.unsubscribe(subscription);
        queue.advance_to(start + Duration::from_secs(1));
        assert!(queue.drain().is_empty());
        assert_eq!(queue.time_until_next(start), None);
        assert!(!queue.is_subscribed());
    }
}
