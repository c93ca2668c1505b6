//! The unit of scheduling.

use std::fmt;

/// Simulated time, in the driver's time units. Always non-negative.
pub type Time = u64;

/// A job's globally unique, driver-supplied identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        JobId(id)
    }
}

/// A unit of work admitted into the scheduler.
///
/// A `Job` is owned by exactly one container at a time: either the
/// [`crate::queue::ReadyQueue`] (while *queued*) or a single
/// [`crate::cores::CoreArray`] slot (while *running*). Transfers between the
/// two are moves, never shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    /// Time at which the job entered the system. Immutable, unique per run.
    pub arrival_time: Time,
    /// Total service requirement, known at arrival. Immutable.
    pub run_time: Time,
    /// Service still owed. Decreases only while running; reaches zero at
    /// completion.
    pub remaining_time: Time,
    /// Lower value means higher priority. Immutable.
    pub priority: i64,
    /// Time of first dispatch onto any core. `None` until it happens.
    pub first_dispatch_time: Option<Time>,
    /// Time of the most recent dispatch onto a core, or `None` while queued.
    pub last_dispatch_time: Option<Time>,
}

impl Job {
    /// Constructs a freshly-arrived job: queued, never dispatched.
    pub fn new(id: JobId, arrival_time: Time, run_time: Time, priority: i64) -> Self {
        Job {
            id,
            arrival_time,
            run_time,
            remaining_time: run_time,
            priority,
            first_dispatch_time: None,
            last_dispatch_time: None,
        }
    }

    /// `true` once the job has begun executing on a core at least once.
    pub fn has_dispatched(&self) -> bool {
        self.first_dispatch_time.is_some()
    }

    /// `true` while the job occupies a core.
    pub fn is_running(&self) -> bool {
        self.last_dispatch_time.is_some()
    }

    /// `true` once `remaining_time` has been driven to zero.
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }
}
