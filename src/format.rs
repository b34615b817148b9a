//! Outcome rendering
//!
//! Pure text formatting of a [`DecodeOutcome`]: a fatal failure keeps the
//! engine's own message, a license-limited decode is deliberately worded
//! exactly like an empty one, and a success lists every result with its
//! raw payload as uppercase hex. No I/O happens here.

use std::fmt::Write as _;

use thiserror::Error;

use crate::models::DecodeOutcome;

const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode payload bytes as uppercase hex, one space after every byte
///
/// `[0x48, 0x45]` renders as `"48 45 "`; an empty payload renders as the
/// empty string. Order-preserving and byte-exact: [`hex_decode`] recovers
/// the original sequence.
pub fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for &byte in bytes {
        out.push(HEX_CHARS[(byte >> 4) as usize] as char);
        out.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
        out.push(' ');
    }
    out
}

/// Error raised when hex text does not describe whole bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex byte {token:?}")]
pub struct HexDecodeError {
    /// The offending whitespace-separated token
    pub token: String,
}

/// Decode space-separated uppercase hex back into bytes
///
/// Accepts exactly the output of [`hex_encode`], including the trailing
/// space; every token must be two hex digits.
pub fn hex_decode(text: &str) -> Result<Vec<u8>, HexDecodeError> {
    let mut out = Vec::new();
    for token in text.split_whitespace() {
        if token.len() != 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexDecodeError {
                token: token.to_string(),
            });
        }
        let byte = u8::from_str_radix(token, 16).map_err(|_| HexDecodeError {
            token: token.to_string(),
        })?;
        out.push(byte);
    }
    Ok(out)
}

/// Render a decode outcome as the user-facing report
pub fn format_outcome(outcome: &DecodeOutcome) -> String {
    match outcome {
        DecodeOutcome::Failed { message, .. } => {
            format!("Failed to read barcode: {message}\n")
        }
        // License-limited decodes read exactly like empty ones: users
        // should not see licensing detail for symbologies they did not
        // pay for.
        DecodeOutcome::Empty { elapsed } | DecodeOutcome::LicenseLimited { elapsed, .. } => {
            format!(
                "No barcode found. Total time spent: {:.3} seconds.\n",
                elapsed.as_secs_f64()
            )
        }
        DecodeOutcome::Success { results, elapsed } => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "Total barcode(s) found: {}. Total time spent: {:.3} seconds",
                results.len(),
                elapsed.as_secs_f64()
            );
            out.push('\n');
            for (index, result) in results.iter().enumerate() {
                let _ = writeln!(out, "Barcode {}:", index + 1);
                let _ = writeln!(out, "    Type: {}", result.format);
                let _ = writeln!(out, "    Value: {}", result.text);
                let _ = writeln!(out, "    Hex Data: {}", hex_encode(&result.bytes));
            }
            out
        }
    }
}
