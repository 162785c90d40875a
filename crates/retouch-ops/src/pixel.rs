//! Shared per-pixel plumbing for the kernels.
//!
//! When the `parallel` feature is enabled, rows are handed to rayon;
//! otherwise they are walked in order. Each row is processed by the same
//! closure either way, so output is bit-identical across both builds.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use retouch_core::CHANNELS;

/// Rounds a channel value to the nearest byte, ties to even, after
/// clamping to `[0, 255]`. Non-finite input maps to 0.
#[inline]
pub fn quantize(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Applies `f` to every row of `data`, passing the row index.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Applies `f` to every row of `data`, passing the row index (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(data: &mut [T], row_len: usize, f: F)
where
    F: Fn(usize, &mut [T]),
{
    if row_len == 0 {
        return;
    }
    for (y, row) in data.chunks_mut(row_len).enumerate() {
        f(y, row);
    }
}

/// Applies `f` to every RGBA pixel of interleaved `samples` in place.
pub(crate) fn map_pixels<F>(samples: &mut [u8], row_len: usize, f: F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    for_each_row(samples, row_len, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            f(px);
        }
    });
}
