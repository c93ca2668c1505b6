//! The fixed-size array of CPU cores and the preemption scan over it.

use crate::error::SchedulerError;
use crate::job::{Job, JobId, Time};
use crate::policy::Policy;

/// Index of one of the `0..cores` fixed cores.
pub type CoreId = usize;

/// A fixed-size array of core slots, each holding at most one running job.
#[derive(Debug)]
pub struct CoreArray {
    slots: Vec<Option<Job>>,
}

impl CoreArray {
    /// Creates `cores` empty slots.
    pub fn new(cores: usize) -> Self {
        CoreArray {
            slots: (0..cores).map(|_| None).collect(),
        }
    }

    /// Number of cores.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The lowest-indexed idle core, if any.
    pub fn first_idle(&self) -> Option<CoreId> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// Read-only access to a core's current occupant, if any.
    pub fn occupant(&self, core_id: CoreId) -> Result<Option<&Job>, SchedulerError> {
        self.slots
            .get(core_id)
            .map(|slot| slot.as_ref())
            .ok_or(SchedulerError::CoreOutOfRange {
                core_id,
                cores: self.slots.len(),
            })
    }

    /// Mutable access to a core's current occupant, if any.
    pub fn occupant_mut(&mut self, core_id: CoreId) -> Result<Option<&mut Job>, SchedulerError> {
        let cores = self.slots.len();
        self.slots
            .get_mut(core_id)
            .map(|slot| slot.as_mut())
            .ok_or(SchedulerError::CoreOutOfRange { core_id, cores })
    }

    /// Assigns `job` to `core_id`, which must currently be idle. Sets the
    /// job's `last_dispatch_time` to `clock`.
    pub fn assign(
        &mut self,
        core_id: CoreId,
        mut job: Job,
        clock: Time,
    ) -> Result<(), SchedulerError> {
        let cores = self.slots.len();
        let slot = self
            .slots
            .get_mut(core_id)
            .ok_or(SchedulerError::CoreOutOfRange { core_id, cores })?;
        if slot.is_some() {
            return Err(SchedulerError::CoreBusy { core_id });
        }
        job.last_dispatch_time = Some(clock);
        *slot = Some(job);
        Ok(())
    }

    /// Releases `core_id`, which must hold a job whose id is `expected_id`.
    /// Clears the slot and marks the job not-running.
    pub fn release(
        &mut self,
        core_id: CoreId,
        expected_id: JobId,
    ) -> Result<Job, SchedulerError> {
        let cores = self.slots.len();
        let slot = self
            .slots
            .get_mut(core_id)
            .ok_or(SchedulerError::CoreOutOfRange { core_id, cores })?;
        match slot {
            None => Err(SchedulerError::CoreIdle {
                core_id,
                expected: Some(expected_id),
            }),
            Some(job) if job.id != expected_id => Err(SchedulerError::CoreOccupantMismatch {
                core_id,
                expected: expected_id,
                found: job.id,
            }),
            Some(_) => {
                let mut job = slot.take().expect("checked Some above");
                job.last_dispatch_time = None;
                Ok(job)
            }
        }
    }

    /// Releases whatever job `core_id` currently holds, regardless of id.
    /// Used by quantum expiry, where the driver names only the core, not the
    /// job it expects to find there.
    pub fn take_any(&mut self, core_id: CoreId) -> Result<Job, SchedulerError> {
        let cores = self.slots.len();
        let slot = self
            .slots
            .get_mut(core_id)
            .ok_or(SchedulerError::CoreOutOfRange { core_id, cores })?;
        match slot.take() {
            Some(mut job) => {
                job.last_dispatch_time = None;
                Ok(job)
            }
            None => Err(SchedulerError::CoreIdle {
                core_id,
                expected: None,
            }),
        }
    }

    /// Finds the preemption victim for `candidate` under `policy`: the core
    /// whose occupant compares strictly greater than (is strictly worse
    /// than) `candidate`, and among such cores the one with the largest
    /// (worst) key, ties broken by latest arrival time. Only meaningful to
    /// call when [`CoreArray::first_idle`] is `None`.
    ///
    /// Returns the victim core id without mutating any state; the caller is
    /// responsible for releasing and reassigning.
    pub fn find_preemption_victim(&self, candidate: &Job, policy: Policy) -> Option<CoreId> {
        let mut worst: Option<CoreId> = None;
        for (core_id, slot) in self.slots.iter().enumerate() {
            let occupant = match slot {
                Some(j) => j,
                None => continue,
            };
            if policy.compare(occupant, candidate) != std::cmp::Ordering::Greater {
                continue;
            }
            worst = match worst {
                None => Some(core_id),
                Some(current_worst) => {
                    let current = self.slots[current_worst].as_ref().expect("occupied");
                    match policy.compare(occupant, current) {
                        std::cmp::Ordering::Greater => Some(core_id),
                        std::cmp::Ordering::Equal if occupant.arrival_time > current.arrival_time => {
                            Some(core_id)
                        }
                        _ => Some(current_worst),
                    }
                }
            };
        }
        worst
    }
}
