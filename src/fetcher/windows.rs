//! Batch window partitioning.
//!
//! Both strategies cover `[0, total_items)` with contiguous,
//! non-overlapping windows whose sizes sum exactly to `total_items`;
//! they are pure functions of their inputs so runs are reproducible.

/// A contiguous slice of the wall's post index range, consumed by
/// exactly one fetch unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchWindow {
    /// Starting index into the remote post list
    pub offset: u64,
    /// Number of posts this window requests
    pub size: u64,
}

/// Partition into capacity-sized windows. This is the canonical
/// strategy; the orchestrator sizes `window_capacity` to what one
/// batched `execute` call covers.
///
/// # Panics
///
/// Panics if `window_capacity` is 0.
pub fn partition_by_capacity(total_items: u64, window_capacity: u64) -> Vec<BatchWindow> {
    assert!(window_capacity > 0, "window capacity must be positive");

    let mut windows = Vec::new();
    let mut offset = 0;
    while offset < total_items {
        windows.push(BatchWindow {
            offset,
            size: window_capacity.min(total_items - offset),
        });
        offset += window_capacity;
    }
    windows
}

/// Partition into one window per worker, the last absorbing the
/// remainder.
///
/// Legacy strategy kept from the process-pool fetch mode; the engine's
/// orchestrator does not use it. Worker counts above `total_items` are
/// clamped so no window is empty.
///
/// # Panics
///
/// Panics if `workers` is 0.
pub fn partition_evenly(total_items: u64, workers: u64) -> Vec<BatchWindow> {
    assert!(workers > 0, "worker count must be positive");

    if total_items == 0 {
        return Vec::new();
    }

    let workers = workers.min(total_items);
    let base = total_items / workers;
    let remainder = total_items % workers;

    (0..workers)
        .map(|i| BatchWindow {
            offset: i * base,
            size: if i == workers - 1 {
                base + remainder
            } else {
                base
            },
        })
        .collect()
}
