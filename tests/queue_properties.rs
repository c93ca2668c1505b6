//! Property-based tests for the ready queue's ordering and identity
//! guarantees (spec §8).

use core_scheduler_sim::{Job, JobId, Policy, ReadyQueue};
use proptest::prelude::*;

/// A small, valid batch of jobs: unique ids, unique arrival times.
fn jobs_strategy() -> impl Strategy<Value = Vec<(u64, u64, u64, i64)>> {
    prop::collection::vec(
        (0u64..1000, 0u64..1000, 1u64..50, -10i64..10),
        0..20,
    )
    .prop_map(|mut entries| {
        // de-duplicate ids and arrival times so the driver precondition holds.
        entries.sort_by_key(|e| e.1);
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.0 = i as u64; // id
            entry.1 = i as u64; // arrival_time, strictly increasing, unique
        }
        entries
    })
}

fn all_policies() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Fcfs),
        Just(Policy::Sjf),
        Just(Policy::Psjf),
        Just(Policy::Pri),
        Just(Policy::Ppri),
        Just(Policy::Rr),
    ]
}

proptest! {
    #[test]
    fn queue_stays_sorted_after_every_offer(
        entries in jobs_strategy(),
        policy in all_policies(),
    ) {
        let mut queue = ReadyQueue::new();
        for (id, arrival, run, priority) in entries {
            let job = Job::new(JobId(id), arrival, run, priority);
            queue.offer(job, policy);

            // non-decreasing under the policy's comparator from front to back
            for window in 0..queue.len().saturating_sub(1) {
                let a = queue.at(window).unwrap();
                let b = queue.at(window + 1).unwrap();
                prop_assert_ne!(policy.compare(a, b), std::cmp::Ordering::Greater);
            }
        }
    }

    #[test]
    fn equal_keyed_entries_preserve_insertion_order(
        entries in jobs_strategy(),
    ) {
        // Under RR every key is equal, so the queue must reduce to plain FIFO.
        let mut queue = ReadyQueue::new();
        let mut expected_order = Vec::new();
        for (id, arrival, run, priority) in &entries {
            let job = Job::new(JobId(*id), *arrival, *run, *priority);
            expected_order.push(job.id);
            queue.offer(job, Policy::Rr);
        }
        let mut actual_order = Vec::new();
        while let Some(job) = queue.poll() {
            actual_order.push(job.id);
        }
        prop_assert_eq!(actual_order, expected_order);
    }

    #[test]
    fn offer_then_remove_by_identity_round_trips_size(
        entries in jobs_strategy(),
        policy in all_policies(),
    ) {
        prop_assume!(!entries.is_empty());
        let mut queue = ReadyQueue::new();
        for (id, arrival, run, priority) in &entries {
            queue.offer(Job::new(JobId(*id), *arrival, *run, *priority), policy);
        }
        let before = queue.len();
        let victim = entries[0].0;
        let removed = queue.remove_by_identity(JobId(victim));
        prop_assert_eq!(removed, 1);
        prop_assert_eq!(queue.len(), before - 1);
    }

    #[test]
    fn offer_then_poll_on_empty_queue_returns_same_job(
        id in 0u64..1000, arrival in 0u64..1000, run in 1u64..50, priority in -10i64..10,
        policy in all_policies(),
    ) {
        let mut queue = ReadyQueue::new();
        let job = Job::new(JobId(id), arrival, run, priority);
        queue.offer(job.clone(), policy);
        prop_assert_eq!(queue.poll(), Some(job));
    }
}
