//! # Ticket SLA timer
//!
//! A pure projection of a ticket's creation time against the SLA window. The
//! detail screen recomputes it every second; nothing is persisted.

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlaTier {
    /// Under 50% of the window used.
    OnTrack,
    /// At least 50% and under 75%.
    Warning,
    /// 75% or more, including past the deadline.
    Breached,
}

impl SlaTier {
    pub fn css_class(self) -> &'static str {
        match self {
            SlaTier::OnTrack => "on-track",
            SlaTier::Warning => "warning",
            SlaTier::Breached => "breached",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlaSnapshot {
    pub elapsed: TimeDelta,
    pub remaining: TimeDelta,
    /// Share of the window used, `0..=100`.
    pub progress: u8,
    pub tier: SlaTier,
}

impl SlaSnapshot {
    pub fn compute(created_at: DateTime<Utc>, now: DateTime<Utc>, window: TimeDelta) -> Self {
        let elapsed = (now - created_at).max(TimeDelta::zero());
        let remaining = (window - elapsed).max(TimeDelta::zero());
        let percent = if window <= TimeDelta::zero() {
            100.0
        } else {
            let ratio = elapsed.num_milliseconds() as f64 / window.num_milliseconds() as f64;
            (ratio * 100.0).clamp(0.0, 100.0)
        };
        // Tiers use the exact share; only the displayed figure is rounded
        let tier = if percent < 50.0 {
            SlaTier::OnTrack
        } else if percent < 75.0 {
            SlaTier::Warning
        } else {
            SlaTier::Breached
        };
        Self {
            elapsed,
            remaining,
            progress: percent.round() as u8,
            tier,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == TimeDelta::zero()
    }
}

/// `HH:MM:SS`, hours not wrapped at 24.
pub fn format_hms(delta: TimeDelta) -> String {
    let secs = delta.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
