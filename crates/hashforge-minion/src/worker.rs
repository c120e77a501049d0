//! Cancellable, parallel enumeration of an inclusive index range.
//!
//! This is the CPU-bound heart of the minion. It is invoked from the
//! axum handler inside `tokio::task::spawn_blocking` so the tight MD5
//! loop never shares a thread with the async reactor — the same "Air
//! Gap" principle the fleet's job-execution engine uses for its own
//! CPU-bound stages, here fanned out with `std::thread::scope` instead
//! of a work-stealing pool because each subrange needs to poll a
//! cancellation flag at a fixed cadence, not just run to completion.

use hashforge_scheme::Scheme;
use md5::{Digest, Md5};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Found(String),
    NotFound,
    Cancelled,
    Error,
    InvalidInput,
}

pub struct CrackParams<'a> {
    pub scheme: &'a dyn Scheme,
    pub hash: &'a str,
    pub lo: u64,
    pub hi: u64,
    pub worker_threads: usize,
    pub subrange_min_size: u64,
    pub cancel_every: u64,
    pub cancel_flag: &'a AtomicBool,
}

/// Splits `[lo, hi]` into at most `worker_threads` contiguous, non-empty
/// subranges, each of size at least `subrange_min_size` where possible.
fn partition(lo: u64, hi: u64, worker_threads: usize, subrange_min_size: u64) -> Vec<(u64, u64)> {
    let total = hi - lo + 1;
    let by_size = (total / subrange_min_size.max(1)).max(1);
    let num_subranges = (worker_threads.max(1) as u64).min(by_size).max(1) as usize;

    if num_subranges <= 1 {
        return vec![(lo, hi)];
    }

    let base = total / num_subranges as u64;
    let remainder = total % num_subranges as u64;
    let mut ranges = Vec::with_capacity(num_subranges);
    let mut cursor = lo;
    for idx in 0..num_subranges {
        let size = base + if (idx as u64) < remainder { 1 } else { 0 };
        let end = cursor + size - 1;
        ranges.push((cursor, end));
        cursor = end + 1;
    }
    ranges
}

enum SubrangeResult {
    Found(String),
    NotFound,
    Cancelled,
}

fn md5_hex(candidate: &str) -> String {
    let digest = Md5::digest(candidate.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn run_subrange(
    scheme: &dyn Scheme,
    target: &str,
    lo: u64,
    hi: u64,
    cancel_every: u64,
    cancel_flag: &AtomicBool,
    found: &AtomicBool,
    found_password: &Mutex<Option<String>>,
) -> SubrangeResult {
    let cancel_every = cancel_every.max(1);
    let mut since_poll = 0u64;
    for i in lo..=hi {
        since_poll += 1;
        if since_poll >= cancel_every {
            since_poll = 0;
            if cancel_flag.load(Ordering::Acquire) || found.load(Ordering::Acquire) {
                return SubrangeResult::Cancelled;
            }
        }
        let candidate = match scheme.at(i) {
            Ok(c) => c,
            Err(_) => return SubrangeResult::NotFound,
        };
        if md5_hex(&candidate) == target {
            if !found.swap(true, Ordering::AcqRel) {
                *found_password.lock().unwrap() = Some(candidate.clone());
            }
            return SubrangeResult::Found(candidate);
        }
    }
    SubrangeResult::NotFound
}

/// Runs the whole crack. Blocking — call from `spawn_blocking`.
pub fn crack(params: CrackParams<'_>) -> WorkerOutcome {
    let CrackParams {
        scheme,
        hash,
        lo,
        hi,
        worker_threads,
        subrange_min_size,
        cancel_every,
        cancel_flag,
    } = params;

    if lo > hi || hi >= scheme.size() {
        return WorkerOutcome::InvalidInput;
    }

    let ranges = partition(lo, hi, worker_threads, subrange_min_size);
    let found = AtomicBool::new(false);
    let found_password: Mutex<Option<String>> = Mutex::new(None);

    let mut had_error = false;
    let mut had_cancelled = false;
    let mut had_not_found = false;

    let found_ref = &found;
    let found_password_ref = &found_password;
    let outcomes: Vec<std::thread::Result<SubrangeResult>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|(s, e)| {
                scope.spawn(move || {
                    run_subrange(scheme, hash, s, e, cancel_every, cancel_flag, found_ref, found_password_ref)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect()
    });

    for outcome in outcomes {
        match outcome {
            Ok(SubrangeResult::Found(_)) => {}
            Ok(SubrangeResult::NotFound) => had_not_found = true,
            Ok(SubrangeResult::Cancelled) => had_cancelled = true,
            Err(_) => had_error = true,
        }
    }

    if found.load(Ordering::Acquire) {
        let password = found_password.lock().unwrap().clone();
        return match password {
            Some(p) => WorkerOutcome::Found(p),
            None => WorkerOutcome::Error,
        };
    }
    if had_error {
        return WorkerOutcome::Error;
    }
    if had_cancelled {
        return WorkerOutcome::Cancelled;
    }
    if had_not_found {
        return WorkerOutcome::NotFound;
    }
    WorkerOutcome::NotFound
}
