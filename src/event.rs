// MIT License - Copyright (c) 2026 Peter Wright
// Partition state events

use serde::Serialize;

/// Transitions detected between two successive armed-partition polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "partition")]
pub enum PanelEvent {
    /// Partition became armed
    PartitionArmed(u32),
    /// Partition became disarmed
    PartitionDisarmed(u32),
    /// No partition was armed before, at least one is now
    SystemArmed,
    /// At least one partition was armed before, none is now
    SystemDisarmed,
}

impl PanelEvent {
    /// Short name used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            PanelEvent::PartitionArmed(_) => "PartitionArmed",
            PanelEvent::PartitionDisarmed(_) => "PartitionDisarmed",
            PanelEvent::SystemArmed => "SystemArmed",
            PanelEvent::SystemDisarmed => "SystemDisarmed",
        }
    }
}
