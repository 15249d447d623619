//! The snapshot push boundary.

use voxim_core::Snapshot;

/// Consumes snapshots as the stepping loop produces them.
///
/// Delivery is synchronous: a slow listener stalls the loop. Snapshots
/// arrive in strictly increasing time order within one episode.
pub trait SnapshotListener: Send {
    /// Called once per delivered step.
    fn on_snapshot(&mut self, snapshot: &Snapshot);
}

/// A listener that retains every `every`-th snapshot.
#[derive(Debug, Default)]
pub struct SnapshotLog {
    every: usize,
    seen: usize,
    snapshots: Vec<Snapshot>,
}

impl SnapshotLog {
    /// Retains every snapshot.
    pub fn new() -> Self {
        Self::every(1)
    }

    /// Retains one snapshot per `every` delivered (the first of each
    /// stretch). `every = 0` behaves like 1.
    pub fn every(every: usize) -> Self {
        Self { every: every.max(1), seen: 0, snapshots: Vec::new() }
    }

    /// The snapshots retained so far, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Consumes the log, yielding the retained snapshots.
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl SnapshotListener for SnapshotLog {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        if self.seen % self.every == 0 {
            self.snapshots.push(snapshot.clone());
        }
        self.seen += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(time: f64) -> Snapshot {
        Snapshot { time, objects: Vec::new() }
    }

    #[test]
    fn log_retains_every_nth() {
        let mut log = SnapshotLog::every(3);
        for i in 0..7 {
            log.on_snapshot(&snapshot(i as f64));
        }
        let times: Vec<f64> = log.snapshots().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn zero_stride_acts_like_one() {
        let mut log = SnapshotLog::every(0);
        log.on_snapshot(&snapshot(0.5));
        log.on_snapshot(&snapshot(1.0));
        assert_eq!(log.snapshots().len(), 2);
    }
}
