// MIT License - Copyright (c) 2026 Peter Wright
// Armed/disarmed detection across polls

use tracing::{debug, info};

use crate::decode::ZoneBitmap;
use crate::event::PanelEvent;

/// Remembers the last armed-partition bitmap and reports what changed.
///
/// Lives outside the codec: the decoder stays a pure function of one
/// payload, and this type only consumes its results. Only the most recent
/// bitmap is kept.
#[derive(Debug, Clone, Default)]
pub struct PartitionTracker {
    previous: Option<ZoneBitmap>,
}

impl PartitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` and return the transitions since the previous poll.
    ///
    /// The first observation only establishes the baseline and emits nothing.
    /// Per-partition events come first in ascending partition order, followed
    /// by a system-level event when the overall armed state flipped.
    pub fn update(&mut self, current: ZoneBitmap) -> Vec<PanelEvent> {
        let Some(previous) = self.previous.replace(current.clone()) else {
            debug!("Initial armed partitions: {:?}", current.to_vec());
            return Vec::new();
        };

        let mut events = Vec::new();
        if previous == current {
            return events;
        }

        let mut changes: Vec<PanelEvent> = current
            .difference(&previous)
            .into_iter()
            .map(PanelEvent::PartitionArmed)
            .chain(
                previous
                    .difference(&current)
                    .into_iter()
                    .map(PanelEvent::PartitionDisarmed),
            )
            .collect();
        changes.sort_by_key(|event| match event {
            PanelEvent::PartitionArmed(p) | PanelEvent::PartitionDisarmed(p) => *p,
            _ => 0,
        });
        events.extend(changes);

        if previous.is_empty() && !current.is_empty() {
            info!("One or more armed partitions => alarm is armed");
            events.push(PanelEvent::SystemArmed);
        } else if !previous.is_empty() && current.is_empty() {
            info!("No armed partitions found => alarm is not armed");
            events.push(PanelEvent::SystemDisarmed);
        }

        events
    }

    /// Whether any partition was armed at the last observation.
    pub fn is_armed(&self) -> bool {
        self.previous.as_ref().is_some_and(|bitmap| !bitmap.is_empty())
    }

    pub fn current(&self) -> Option<&ZoneBitmap> {
        self.previous.as_ref()
    }

    /// Forget the baseline; the next update is treated as the first.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(partitions: &[u32]) -> ZoneBitmap {
        partitions.iter().copied().collect()
    }

    #[test]
    fn test_first_update_is_baseline() {
        let mut tracker = PartitionTracker::new();
        assert!(!tracker.is_armed());
        assert!(tracker.update(bitmap(&[1, 2])).is_empty());
        assert!(tracker.is_armed());
        assert_eq!(tracker.current(), Some(&bitmap(&[1, 2])));
    }

    #[test]
    fn test_no_change_no_events() {
        let mut tracker = PartitionTracker::new();
        tracker.update(bitmap(&[3]));
        assert!(tracker.update(bitmap(&[3])).is_empty());
    }

    #[test]
    fn test_system_armed() {
        let mut tracker = PartitionTracker::new();
        tracker.update(bitmap(&[]));
        let events = tracker.update(bitmap(&[2, 1]));
        assert_eq!(
            events,
            vec![
                PanelEvent::PartitionArmed(1),
                PanelEvent::PartitionArmed(2),
                PanelEvent::SystemArmed,
            ]
        );
    }

    #[test]
    fn test_system_disarmed() {
        let mut tracker = PartitionTracker::new();
        tracker.update(bitmap(&[4]));
        let events = tracker.update(bitmap(&[]));
        assert_eq!(
            events,
            vec![PanelEvent::PartitionDisarmed(4), PanelEvent::SystemDisarmed]
        );
        assert!(!tracker.is_armed());
    }

    #[test]
    fn test_mixed_changes_sorted() {
        let mut tracker = PartitionTracker::new();
        tracker.update(bitmap(&[1, 5]));
        let events = tracker.update(bitmap(&[3, 5, 9]));
        assert_eq!(
            events,
            vec![
                PanelEvent::PartitionDisarmed(1),
                PanelEvent::PartitionArmed(3),
                PanelEvent::PartitionArmed(9),
            ]
        );
    }

    #[test]
    fn test_reset() {
        let mut tracker = PartitionTracker::new();
        tracker.update(bitmap(&[1]));
        tracker.reset();
        assert!(tracker.current().is_none());
        assert!(tracker.update(bitmap(&[])).is_empty());
    }
}
