//! Pre-flight memory estimation for the clustering pipeline.
//!
//! Provides a conservative estimate of peak memory consumption so callers
//! can reject oversized datasets before any allocation occurs. The estimate
//! is intentionally pessimistic: a safety multiplier covers heap
//! fragmentation, Rayon thread-local buffers, and transient allocations that
//! are hard to predict statically.

use crate::builder::Algorithm;

/// Safety multiplier applied to the raw estimate (3/2).
const SAFETY_MULTIPLIER_NUMERATOR: u64 = 3;
const SAFETY_MULTIPLIER_DENOMINATOR: u64 = 2;

/// Size of an `f64` — matrix cells, core distances, λ values.
const F64_BYTES: u64 = 8;

/// Size of an MST edge (`source: usize`, `target: usize`, `weight: f64`).
const MST_EDGE_BYTES: u64 = 24;

/// Size of a dendrogram row (`left`, `right`, `size`: usize, `delta`: f64).
const DENDROGRAM_ROW_BYTES: u64 = 32;

/// Size of a condensed row (`parent`, `child`, `size`: usize, `lambda`: f64).
const CONDENSED_ROW_BYTES: u64 = 32;

/// Per-slot cost of the linkage union-find (parent + size entries).
const UNION_FIND_SLOT_BYTES: u64 = 16;

/// Returns a conservative peak-memory estimate in bytes for clustering
/// `points` items with the given backend, or `None` when the estimate
/// overflows 64 bits.
///
/// The dense backend is dominated by the N×N reachability matrix; the
/// on-demand backend only keeps per-point state. Both share the edge list,
/// dendrogram, condensed rows, and union-find costs of the hierarchy stage.
#[must_use]
pub fn estimate_peak_bytes(points: usize, algorithm: Algorithm) -> Option<u64> {
    let n = points as u64;

    let backend = match algorithm {
        Algorithm::Generic => n.checked_mul(n)?.checked_mul(F64_BYTES)?,
        // Core distances plus one scratch row per worker; a full extra row
        // per point over-counts generously enough to cover the workers.
        Algorithm::PrimsIndexed => n.checked_mul(F64_BYTES)?.checked_mul(2)?,
    };

    let edges = n.checked_mul(MST_EDGE_BYTES)?;
    let dendrogram = n.checked_mul(DENDROGRAM_ROW_BYTES)?;
    // Every point falls out exactly once and each cluster child adds a row;
    // 2N rows bound the condensed tree.
    let condensed = n.checked_mul(2)?.checked_mul(CONDENSED_ROW_BYTES)?;
    let union_find = n.checked_mul(2)?.checked_mul(UNION_FIND_SLOT_BYTES)?;
    let labels = n.checked_mul(F64_BYTES)?;

    let raw = backend
        .checked_add(edges)?
        .checked_add(dendrogram)?
        .checked_add(condensed)?
        .checked_add(union_find)?
        .checked_add(labels)?;

    raw.checked_mul(SAFETY_MULTIPLIER_NUMERATOR)
        .map(|scaled| scaled / SAFETY_MULTIPLIER_DENOMINATOR)
}

/// Renders a byte count with a binary unit suffix.
///
/// # Examples
/// ```
/// use otoro_core::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(2_097_152), "2.0 MiB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    value /= 1024.0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
