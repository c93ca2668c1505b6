//! The scheduler engine: the event handlers that tie the comparator, ready
//! queue, and core array together, plus the simulated clock and statistics.
//!
//! Generalizes the teacher's `CoreScheduler` (policy-tagged dispatch loop
//! over per-CPU state) down to the one thing this simulator needs: a single
//! active policy for the whole run, three externally-driven events, and
//! exact wait/turnaround/response accounting.

use log::{debug, error, info};

use crate::cores::{CoreArray, CoreId};
use crate::error::SchedulerError;
use crate::job::{Job, JobId, Time};
use crate::policy::Policy;
use crate::queue::ReadyQueue;
use crate::stats::Statistics;

/// Lifecycle state of the engine, tracked mostly for diagnostics — every
/// public event handler only does meaningful work while `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed but not yet started.
    Uninitialized,
    /// Accepting events.
    Running,
    /// `clean_up` has been called; no further events are expected.
    Stopped,
}

/// Validated startup parameters: the two things a driver configures once,
/// at `start_up` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub cores: usize,
    pub policy: Policy,
}

impl EngineConfig {
    /// Validates `cores > 0` (the one documented `start_up` precondition)
    /// and bundles it with the chosen policy.
    pub fn new(cores: usize, policy: Policy) -> Result<Self, SchedulerError> {
        if cores == 0 {
            return Err(SchedulerError::ZeroCores);
        }
        Ok(EngineConfig { cores, policy })
    }
}

/// The scheduling decision engine.
///
/// Owns the core array, the ready queue, the active policy, the simulated
/// clock, and the statistics accumulators. There is no global or static
/// state anywhere in this crate — every run gets its own `SchedulerEngine`,
/// and nothing prevents several independent engines coexisting.
///
/// Single-threaded and cooperative: every public method runs an event to
/// completion before returning, and the type carries no interior mutability,
/// so a caller driving it from multiple threads must externally serialize
/// calls, exactly as the spec requires.
#[derive(Debug)]
pub struct SchedulerEngine {
    state: EngineState,
    config: EngineConfig,
    cores: CoreArray,
    queue: ReadyQueue,
    clock: Time,
    stats: Statistics,
}

impl SchedulerEngine {
    /// Initializes the engine. Must be called exactly once before any event
    /// is delivered — there is no separate "new, then configure" step,
    /// since Rust has no notion of a method call on an uninitialized value.
    pub fn start_up(cores: usize, policy: Policy) -> Self {
        let config = EngineConfig::new(cores, policy).unwrap_or_else(|err| {
            error!("start_up precondition violated: {err}");
            panic!("{err}");
        });
        info!(
            "scheduler starting up: {} core(s), policy {:?}",
            config.cores, config.policy
        );
        SchedulerEngine {
            state: EngineState::Running,
            cores: CoreArray::new(config.cores),
            queue: ReadyQueue::new(),
            clock: 0,
            stats: Statistics::new(),
            config,
        }
    }

    /// The active policy, fixed since `start_up`.
    pub fn policy(&self) -> Policy {
        self.config.policy
    }

    /// Number of cores, fixed since `start_up`.
    pub fn cores(&self) -> usize {
        self.config.cores
    }

    /// The simulated clock's current value.
    pub fn clock(&self) -> Time {
        self.clock
    }

    /// The engine's lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The job currently occupying each busy core, paired with its core id.
    /// Not part of the driver-facing event contract; exists so invariant
    /// checks (see the property tests) can inspect core occupancy directly.
    pub fn running_jobs(&self) -> impl Iterator<Item = (CoreId, &Job)> + '_ {
        (0..self.cores.len()).filter_map(move |core_id| {
            self.cores
                .occupant(core_id)
                .ok()
                .flatten()
                .map(move |job| (core_id, job))
        })
    }

    /// The jobs currently waiting in the ready queue, front to back.
    pub fn queued_jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.queue.iter()
    }

    /// A new job arrived. Returns the core it was dispatched to, if any.
    pub fn job_arrived(
        &mut self,
        id: JobId,
        time: Time,
        run_time: Time,
        priority: i64,
    ) -> Option<CoreId> {
        self.try_job_arrived(id, time, run_time, priority)
            .unwrap_or_else(|err| {
                error!("job_arrived precondition violated: {err}");
                panic!("{err}");
            })
    }

    /// A running job finished. Returns the job newly assigned to `core_id`,
    /// if the core was handed another job from the ready queue.
    pub fn job_finished(&mut self, core_id: CoreId, id: JobId, time: Time) -> Option<JobId> {
        self.try_job_finished(core_id, id, time)
            .unwrap_or_else(|err| {
                error!("job_finished precondition violated: {err}");
                panic!("{err}");
            })
    }

    /// A quantum expired on `core_id`. Valid only under `Policy::Rr`.
    pub fn quantum_expired(&mut self, core_id: CoreId, time: Time) -> Option<JobId> {
        self.try_quantum_expired(core_id, time)
            .unwrap_or_else(|err| {
                error!("quantum_expired precondition violated: {err}");
                panic!("{err}");
            })
    }

    /// Average waiting time over all finished jobs so far (0 if none).
    pub fn average_waiting_time(&self) -> f64 {
        self.stats.average_waiting_time()
    }

    /// Average turnaround time over all finished jobs so far (0 if none).
    pub fn average_turnaround_time(&self) -> f64 {
        self.stats.average_turnaround_time()
    }

    /// Average response time over all dispatched jobs so far (0 if none).
    pub fn average_response_time(&self) -> f64 {
        self.stats.average_response_time()
    }

    /// Terminal call releasing the engine's resources. There is no heap or
    /// file resource in this pure-Rust engine that `Drop` does not already
    /// reclaim; this method exists for contract parity with spec §6's
    /// explicit teardown call and simply marks the engine stopped.
    pub fn clean_up(mut self) {
        self.state = EngineState::Stopped;
        debug!("scheduler shut down after clock={}", self.clock);
    }

    // --- internal, fallible implementations -------------------------------

    fn try_job_arrived(
        &mut self,
        id: JobId,
        time: Time,
        run_time: Time,
        priority: i64,
    ) -> Result<Option<CoreId>, SchedulerError> {
        self.advance_time(time)?;
        let job = Job::new(id, time, run_time, priority);

        if let Some(core_id) = self.cores.first_idle() {
            debug!("dispatching job {id} onto idle core {core_id}");
            self.cores.assign(core_id, job, self.clock)?;
            return Ok(Some(core_id));
        }

        if self.config.policy.is_preemptive() {
            if let Some(victim_core) = self.cores.find_preemption_victim(&job, self.config.policy) {
                let displaced_id = self
                    .cores
                    .occupant(victim_core)?
                    .expect("victim core must be occupied")
                    .id;
                let displaced = self.cores.release(victim_core, displaced_id)?;
                debug!(
                    "job {id} preempts job {displaced_id} on core {victim_core}"
                );
                self.queue.offer(displaced, self.config.policy);
                self.cores.assign(victim_core, job, self.clock)?;
                return Ok(Some(victim_core));
            }
        }

        debug!("enqueuing job {id}, no idle core and no preemption");
        self.queue.offer(job, self.config.policy);
        Ok(None)
    }

    fn try_job_finished(
        &mut self,
        core_id: CoreId,
        id: JobId,
        time: Time,
    ) -> Result<Option<JobId>, SchedulerError> {
        self.advance_time(time)?;
        let finished = self.cores.release(core_id, id)?;

        let wait = self.clock - finished.arrival_time - finished.run_time;
        let turnaround = self.clock - finished.arrival_time;
        self.stats.record_completion(wait, turnaround);
        debug!(
            "job {id} finished on core {core_id}: wait={wait} turnaround={turnaround}"
        );
        drop(finished);

        self.dispatch_from_queue(core_id)
    }

    fn try_quantum_expired(
        &mut self,
        core_id: CoreId,
        time: Time,
    ) -> Result<Option<JobId>, SchedulerError> {
        self.advance_time(time)?;
        if !self.config.policy.is_quantum_driven() {
            return Err(SchedulerError::WrongPolicyForQuantum {
                policy: self.config.policy,
            });
        }
        let current = self.cores.take_any(core_id)?;
        debug!("quantum expired for job {} on core {core_id}", current.id);
        self.queue.offer(current, self.config.policy);

        self.dispatch_from_queue(core_id)
    }

    /// Shared tail of `job_finished` and `quantum_expired`: poll the ready
    /// queue and assign whatever comes out to `core_id`.
    fn dispatch_from_queue(&mut self, core_id: CoreId) -> Result<Option<JobId>, SchedulerError> {
        match self.queue.poll() {
            Some(next) => {
                let next_id = next.id;
                self.cores.assign(core_id, next, self.clock)?;
                Ok(Some(next_id))
            }
            None => Ok(None),
        }
    }

    /// Advances the simulated clock to `time`, crediting elapsed running
    /// time to every occupied core and, the first time a job actually runs
    /// for a non-zero interval, crediting its response time.
    fn advance_time(&mut self, time: Time) -> Result<(), SchedulerError> {
        for core_id in 0..self.cores.len() {
            let (last, newly_responding) = match self.cores.occupant(core_id)? {
                None => continue,
                Some(job) => {
                    let last = job.last_dispatch_time.expect("running job has a dispatch time");
                    let newly_responding = job.first_dispatch_time.is_none() && last < time;
                    (last, newly_responding.then_some(job.arrival_time))
                }
            };

            if let Some(arrival) = newly_responding {
                self.stats.record_response(last - arrival);
            }

            let job = self
                .cores
                .occupant_mut(core_id)?
                .expect("core occupancy re-checked above");
            if newly_responding.is_some() {
                job.first_dispatch_time = Some(last);
            }
            job.remaining_time -= time - last;
            job.last_dispatch_time = Some(time);
        }
        self.clock = time;
        Ok(())
    }
}
