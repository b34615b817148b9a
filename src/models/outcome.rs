use std::time::Duration;

use crate::engine::ErrorCode;

/// One decoded barcode as reported by the engine
///
/// Owned by the outcome that produced it; results are never shared across
/// decode calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeResult {
    /// Symbology name (e.g. `QR_CODE`, `CODE_128`)
    pub format: String,
    /// Decoded text content
    pub text: String,
    /// Raw payload bytes, in engine order
    pub bytes: Vec<u8>,
}

impl BarcodeResult {
    /// Create a result record
    pub fn new(
        format: impl Into<String>,
        text: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            format: format.into(),
            text: text.into(),
            bytes: bytes.into(),
        }
    }
}

/// Normalized outcome of a single decode call
///
/// The invoker classifies the engine's raw return code exactly once, so
/// downstream formatting can pattern-match exhaustively instead of
/// re-deriving the license-code allowlist.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// At least one barcode was found
    Success {
        /// Results in the order the engine reported them
        results: Vec<BarcodeResult>,
        /// Wall-clock time of the decode call itself
        elapsed: Duration,
    },
    /// The decode ran cleanly but found nothing
    Empty {
        /// Wall-clock time of the decode call itself
        elapsed: Duration,
    },
    /// A symbology was not licensed; reported to the user as an empty result
    LicenseLimited {
        /// The feature-limited code the engine returned
        code: ErrorCode,
        /// Wall-clock time of the decode call itself
        elapsed: Duration,
    },
    /// The engine failed outright
    Failed {
        /// The fatal code the engine returned
        code: ErrorCode,
        /// Engine-supplied description of the code
        message: String,
    },
}

impl DecodeOutcome {
    /// Number of barcodes this outcome reports to the user
    pub fn result_count(&self) -> usize {
        match self {
            DecodeOutcome::Success { results, .. } => results.len(),
            _ => 0,
        }
    }
}
