//! region_scan - Region-aware barcode decode sessions
//!
//! An interactive session that decodes barcodes from still images,
//! optionally constraining the search to a sub-region of the image. The
//! recognition engine itself is pluggable: anything implementing
//! [`engine::DecodingEngine`] can be driven through the configure, timed
//! decode, and report cycle.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decoding engine contract, error codes, and the fixture engine
pub mod engine;
/// Outcome rendering and the payload hex codec
pub mod format;
/// Timed decode orchestration over any engine
pub mod invoker;
/// Logging setup
pub mod logging;
/// Core data structures (modes, rectangles, outcomes)
pub mod models;
/// Interactive prompt loop and region selector
pub mod session;
/// Decoding configuration templates
pub mod template;

pub use engine::{DecodingEngine, ErrorCode};
pub use models::{BarcodeResult, DecodeMode, DecodeOutcome, RegionRect};
pub use session::{PromptOutcome, RegionSelection, Session};
pub use template::{DecodeTemplate, TemplateError, build_template};

use std::path::Path;

/// Decode one image file in a single call
///
/// Builds the configuration for `mode`, applies it to `engine`, and runs
/// the timed decode. Manual mode requires `region`.
pub fn decode_file<E: DecodingEngine>(
    engine: &mut E,
    image_path: &Path,
    mode: DecodeMode,
    region: Option<RegionRect>,
) -> Result<DecodeOutcome, TemplateError> {
    let template = build_template(mode, region)?;
    Ok(invoker::decode_with_template(engine, image_path, &template))
}
