//! Error taxonomy for the scheduler engine.
//!
//! Every variant here names a precondition violation the driver can commit —
//! assigning into a busy core, releasing the wrong job, expiring a quantum on
//! an idle core, and so on. None of these are recoverable: the engine's
//! public event handlers convert an `Err` into a panic at the boundary (see
//! [`crate::engine::SchedulerEngine`]). The `Result`-returning internal
//! helpers exist so the failure conditions stay independently testable.

use crate::job::JobId;
use crate::policy::Policy;

/// A violation of the engine/driver contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// `start_up` was called with zero cores.
    #[error("cannot start a scheduler with zero cores")]
    ZeroCores,

    /// A core id named by the driver does not exist.
    #[error("core {core_id} is out of range (0..{cores})")]
    CoreOutOfRange { core_id: usize, cores: usize },

    /// `assign` was attempted on a core that already holds a job.
    #[error("core {core_id} is already busy")]
    CoreBusy { core_id: usize },

    /// `release` (or quantum expiry) was attempted on an empty core.
    /// `expected` is the job id the caller named, when it named one —
    /// quantum expiry only names a core, so it leaves this `None`.
    #[error("core {core_id} is idle, expected job {expected:?}")]
    CoreIdle {
        core_id: usize,
        expected: Option<JobId>,
    },

    /// `release` named a job id that does not match the core's occupant.
    #[error("core {core_id} holds job {found}, not job {expected}")]
    CoreOccupantMismatch {
        core_id: usize,
        expected: JobId,
        found: JobId,
    },

    /// `quantum_expired` was called while the active policy is not `RR`.
    #[error("quantum_expired is only valid under RR, active policy is {policy:?}")]
    WrongPolicyForQuantum { policy: Policy },
}
