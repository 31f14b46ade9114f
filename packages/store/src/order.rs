//! # Order status workflow
//!
//! Orders move along `pending → shipped → delivered`, with `cancelled` as a
//! side path. Which target statuses the detail screen offers from each status
//! is the explicit table [`OrderWorkflow::transitions`]; the default table keeps
//! every status reachable from every other one.
//!
//! The step indicator shows the main path, or `pending → cancelled` once an
//! order is cancelled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One entry of the step indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub status: OrderStatus,
    pub completed: bool,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderWorkflow {
    transitions: &'static [(OrderStatus, &'static [OrderStatus])],
}

use OrderStatus::{Cancelled, Delivered, Pending, Shipped};

static ANY_STATUS: &[(OrderStatus, &[OrderStatus])] = &[
    (Pending, &[Shipped, Delivered, Cancelled]),
    (Shipped, &[Pending, Delivered, Cancelled]),
    (Delivered, &[Pending, Shipped, Cancelled]),
    (Cancelled, &[Pending, Shipped, Delivered]),
];

impl Default for OrderWorkflow {
    fn default() -> Self {
        Self::new(ANY_STATUS)
    }
}

impl OrderWorkflow {
    pub const fn new(transitions: &'static [(OrderStatus, &'static [OrderStatus])]) -> Self {
        Self { transitions }
    }

    /// Statuses reachable from `from`.
    pub fn transitions(&self, from: OrderStatus) -> &'static [OrderStatus] {
        self.transitions
            .iter()
            .find(|(status, _)| *status == from)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        self.transitions(from).contains(&to)
    }

    /// The update to send when the user confirms `selected`. `None` means the
    /// submit action is disabled: nothing changed or the move isn't allowed.
    pub fn status_change(&self, current: OrderStatus, selected: OrderStatus) -> Option<OrderStatus> {
        (current != selected && self.allows(current, selected)).then_some(selected)
    }

    /// Step indicator for an order currently at `current`.
    pub fn steps(current: OrderStatus) -> Vec<Step> {
        let path: &[OrderStatus] = if current == Cancelled {
            &[Pending, Cancelled]
        } else {
            &[Pending, Shipped, Delivered]
        };
        let position = path.iter().position(|s| *s == current).unwrap_or(0);
        path.iter()
            .enumerate()
            .map(|(i, status)| Step {
                status: *status,
                completed: i < position || (i == position && i + 1 == path.len()),
                active: i == position,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(Shipped));
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_same_status_is_not_a_change() {
        let workflow = OrderWorkflow::default();
        for status in OrderStatus::ALL {
            assert_eq!(workflow.status_change(status, status), None);
        }
    }

    #[test]
    fn test_default_allows_any_other_status() {
        let workflow = OrderWorkflow::default();
        assert_eq!(workflow.status_change(Pending, Delivered), Some(Delivered));
        assert_eq!(workflow.status_change(Delivered, Pending), Some(Pending));
        assert_eq!(workflow.transitions(Shipped).len(), 3);
    }

    #[test]
    fn test_restricted_table() {
        static FORWARD_ONLY: &[(OrderStatus, &[OrderStatus])] = &[
            (Pending, &[Shipped, Cancelled]),
            (Shipped, &[Delivered]),
        ];
        let workflow = OrderWorkflow::new(FORWARD_ONLY);
        assert_eq!(workflow.status_change(Shipped, Cancelled), None);
        assert_eq!(workflow.status_change(Pending, Cancelled), Some(Cancelled));
        assert!(workflow.transitions(Delivered).is_empty());
    }

    #[test]
    fn test_steps() {
        let steps = OrderWorkflow::steps(Shipped);
        assert_eq!(steps.len(), 3);
        assert!(steps[0].completed);
        assert!(steps[1].active && !steps[1].completed);
        assert!(!steps[2].active);

        let cancelled = OrderWorkflow::steps(Cancelled);
        assert_eq!(
            cancelled.iter().map(|s| s.status).collect::<Vec<_>>(),
            vec![Pending, Cancelled]
        );
        assert!(cancelled[1].completed);
    }
}
