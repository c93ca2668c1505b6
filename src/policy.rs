//! Scheduling disciplines and the comparator that orders jobs under them.

use std::cmp::Ordering;

use crate::job::Job;

/// One of the six scheduling disciplines this engine supports.
///
/// Closed, fixed set — modeled as a sum type rather than any form of dynamic
/// policy registration, since the comparator is a pure function of this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-come, first-served. Non-preemptive.
    Fcfs,
    /// Shortest job first, by total run time. Non-preemptive.
    Sjf,
    /// Preemptive shortest job first, by remaining time.
    Psjf,
    /// Static priority. Non-preemptive.
    Pri,
    /// Preemptive static priority.
    Ppri,
    /// Round robin. Not comparator-preemptive; driven by externally
    /// announced quantum expiry instead.
    Rr,
}

impl Policy {
    /// Whether an arriving job under this policy may preempt a running one.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Psjf | Policy::Ppri)
    }

    /// Whether `quantum_expired` is a valid event under this policy.
    pub fn is_quantum_driven(&self) -> bool {
        matches!(self, Policy::Rr)
    }

    /// Orders two jobs under this policy.
    ///
    /// `Less` means `a` belongs nearer the head of the ready queue (is
    /// dispatched sooner) than `b`. Pure: never mutates either job, never
    /// allocates, never consults a clock.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            Policy::Fcfs => a.arrival_time.cmp(&b.arrival_time),
            Policy::Sjf => a
                .run_time
                .cmp(&b.run_time)
                .then_with(|| a.arrival_time.cmp(&b.arrival_time)),
            Policy::Psjf => a
                .remaining_time
                .cmp(&b.remaining_time)
                .then_with(|| a.arrival_time.cmp(&b.arrival_time)),
            Policy::Pri | Policy::Ppri => a
                .priority
                .cmp(&b.priority)
                .then_with(|| a.arrival_time.cmp(&b.arrival_time)),
            Policy::Rr => Ordering::Equal,
        }
    }
}
