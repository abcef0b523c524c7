//! Hashing utilities for trajectory and system comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they are a fast equality check before an
//! event-by-event comparison.

use propensity_core::{ProcId, System, Time};
use propensity_select::Event;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_time(hash: u64, time: Time) -> u64 {
    fnv1a_u64(hash, time.value().to_bits())
}

/// Hash an event sequence: each process id as 4 LE bytes followed by
/// its time's `f64::to_bits()` as 8 LE bytes.
///
/// Returns `FNV_OFFSET` for an empty sequence.
pub fn trajectory_hash(events: &[Event]) -> u64 {
    events.iter().fold(FNV_OFFSET, |hash, event| {
        fnv1a_time(fnv1a_u32(hash, event.proc.0), event.time)
    })
}

/// Hash a system's observable scheduling state: the process count, every
/// rate's bits in id order, and the last event time.
///
/// Two systems with equal hashes will be scheduled identically by any
/// algorithm given the same seed.
pub fn system_hash<S: System + ?Sized>(system: &S) -> u64 {
    let count = system.process_count();
    let mut hash = fnv1a_u64(FNV_OFFSET, count as u64);
    for id in ProcId::range(count) {
        hash = fnv1a_u64(hash, system.rate(id).value().to_bits());
    }
    fnv1a_time(hash, system.last_event_time())
}
