//! Deferred one-shot actions driven by the frame clock.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Deferred {
    SpawnTreasure,
    ClearBanner,
}

/// Pending actions sorted by deadline, polled once per tick.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    pending: Vec<(f64, Deferred)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the scheduler was created.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queues `action` after `delay`, alongside any pending copies.
    pub fn schedule_once(&mut self, action: Deferred, delay: f32) {
        let deadline = self.now + f64::from(delay.max(0.0));
        let idx = self.pending.partition_point(|&(d, _)| d <= deadline);
        self.pending.insert(idx, (deadline, action));
    }

    /// Like [`schedule_once`](Self::schedule_once) but replaces a pending copy of `action`.
    pub fn schedule_unique(&mut self, action: Deferred, delay: f32) {
        self.cancel(action);
        self.schedule_once(action, delay);
    }

    pub fn cancel(&mut self, action: Deferred) {
        self.pending.retain(|&(_, a)| a != action);
    }

    #[cfg(test)]
    pub fn is_pending(&self, action: Deferred) -> bool {
        self.pending.iter().any(|&(_, a)| a == action)
    }

    /// Advances the clock and drains every action whose deadline has passed.
    pub fn advance(&mut self, dt: f32) -> Vec<Deferred> {
        self.now += f64::from(dt.max(0.0));
        let due = self.pending.partition_point(|&(d, _)| d <= self.now);
        self.pending.drain(..due).map(|(_, a)| a).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_fires_once_after_its_delay() {
        let mut s = Scheduler::new();
        s.schedule_once(Deferred::ClearBanner, 2.0);
        assert!(s.advance(1.5).is_empty());
        assert_eq!(s.advance(0.5), vec![Deferred::ClearBanner]);
        assert!(s.advance(10.0).is_empty());
    }

    #[test]
    fn unique_schedule_replaces_pending_copy() {
        let mut s = Scheduler::new();
        s.schedule_unique(Deferred::SpawnTreasure, 1.0);
        s.advance(0.5);
        s.schedule_unique(Deferred::SpawnTreasure, 1.0);
        assert!(s.advance(0.6).is_empty());
        assert_eq!(s.advance(0.5), vec![Deferred::SpawnTreasure]);
        assert!(!s.is_pending(Deferred::SpawnTreasure));
    }

    #[test]
    fn once_keeps_duplicates() {
        let mut s = Scheduler::new();
        s.schedule_once(Deferred::SpawnTreasure, 1.0);
        s.schedule_once(Deferred::SpawnTreasure, 1.0);
        assert_eq!(s.advance(1.0).len(), 2);
    }

    #[test]
    fn due_actions_come_out_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule_once(Deferred::ClearBanner, 2.0);
        s.schedule_once(Deferred::SpawnTreasure, 1.0);
        assert_eq!(s.advance(3.0), vec![Deferred::SpawnTreasure, Deferred::ClearBanner]);
    }

    #[test]
    fn clock_stays_accurate_over_hours_of_frames() {
        let mut s = Scheduler::new();
        let frames = 60 * 60 * 60 * 4;
        for _ in 0..frames {
            s.advance(1.0 / 60.0);
        }
        assert!((s.now() - 14_400.0).abs() < 0.1, "clock drifted to {}", s.now());

        s.schedule_once(Deferred::ClearBanner, 2.0);
        assert!(s.advance(1.9).is_empty());
        assert_eq!(s.advance(0.2), vec![Deferred::ClearBanner]);
    }
}
