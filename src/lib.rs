//! # core-scheduler-sim
//!
//! A discrete-event simulator for a multi-core CPU job scheduler.
//!
//! The crate answers three externally-timed events —
//! [`SchedulerEngine::job_arrived`], [`SchedulerEngine::job_finished`], and
//! [`SchedulerEngine::quantum_expired`] — with a dispatch decision, and on
//! request reports exact average wait, turnaround, and response times for
//! the run so far. Six scheduling disciplines are supported: FCFS, SJF,
//! PSJF, PRI, PPRI, and RR (see [`Policy`]).
//!
//! The simulator is single-threaded and cooperative: every event runs to
//! completion inside the call that delivers it, driven by a harness that
//! owns simulated time, trace parsing, and output formatting — none of
//! which is this crate's concern.
//!
//! ```
//! use core_scheduler_sim::{JobId, Policy, SchedulerEngine};
//!
//! let mut engine = SchedulerEngine::start_up(1, Policy::Fcfs);
//! engine.job_arrived(JobId(1), 0, 5, 0);
//! engine.job_arrived(JobId(2), 1, 3, 0);
//! let next = engine.job_finished(0, JobId(1), 5);
//! assert_eq!(next, Some(JobId(2)));
//! ```

pub mod cores;
pub mod engine;
pub mod error;
pub mod job;
pub mod policy;
pub mod queue;
pub mod stats;

pub use cores::{CoreArray, CoreId};
pub use engine::{EngineConfig, EngineState, SchedulerEngine};
pub use error::SchedulerError;
pub use job::{Job, JobId, Time};
pub use policy::Policy;
pub use queue::ReadyQueue;
pub use stats::Statistics;
