//! Integration tests for retouch crates.
//!
//! End-to-end checks of the compositor: replay properties across
//! `retouch-core`, `retouch-ops` and `retouch-edit`, and the persisted
//! record format.
//!
//! Set `RUST_LOG=retouch_edit=debug` to see replay decisions while the
//! tests run.

use retouch_core::PixelBuffer;
use sha2::{Digest, Sha256};

#[cfg(test)]
mod persistence;
#[cfg(test)]
mod properties;

/// Installs a test-friendly tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// SHA-256 of a buffer's dimensions and samples, as lowercase hex.
pub fn buffer_digest(buffer: &PixelBuffer) -> String {
    let mut hasher = Sha256::new();
    hasher.update(buffer.width().to_le_bytes());
    hasher.update(buffer.height().to_le_bytes());
    hasher.update(buffer.samples());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Deterministic test image: every pixel differs from its neighbours and
/// no axis is symmetric.
pub fn test_pattern(width: u32, height: u32) -> PixelBuffer {
    let mut samples = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            samples.extend_from_slice(&[
                ((x * 37 + y * 11) % 256) as u8,
                ((y * 53 + x * 5) % 256) as u8,
                ((x * y * 7 + 19) % 256) as u8,
                255,
            ]);
        }
    }
    // Length matches by construction
    PixelBuffer::from_raw(width, height, samples).unwrap_or_else(|_| PixelBuffer::new(width, height))
}
