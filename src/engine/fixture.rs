//! Sidecar-label fixture engine
//!
//! A concrete [`DecodingEngine`] that "decodes" an image by reading a label
//! file next to it (`image.with_extension("txt")`). Each non-comment line
//! describes one barcode:
//!
//! ```text
//! QR_CODE<TAB>HELLO
//! CODE_128<TAB>WORLD<TAB>57 4F 52 4C 44
//! ```
//!
//! The optional third column is the raw payload as space-separated hex
//! bytes; when absent the payload defaults to the UTF-8 bytes of the text.
//! A missing label file is a zero-result decode. This engine drives the
//! interactive session and the integration tests without a licensed
//! recognition engine, while still exercising the real error-code paths.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{DecodingEngine, ErrorCode, ResultSet};
use crate::format::hex_decode;
use crate::models::BarcodeResult;
use crate::template::DecodeTemplate;

/// Engine backed by sidecar label files
#[derive(Debug, Default)]
pub struct FixtureEngine {
    applied: Option<String>,
    pending: Vec<BarcodeResult>,
}

impl FixtureEngine {
    /// Create an engine with no template applied
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_labels(contents: &str) -> Result<Vec<BarcodeResult>, ErrorCode> {
        let mut records = Vec::new();
        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            // Split the raw line: a trailing tab is an explicit empty
            // payload column, which trimming would erase.
            let mut fields = line.split('\t');
            let (Some(format), Some(text)) = (fields.next(), fields.next()) else {
                return Err(ErrorCode::IMAGE_READ_FAILED);
            };
            let bytes = match fields.next() {
                Some(hex) => hex_decode(hex).map_err(|_| ErrorCode::IMAGE_READ_FAILED)?,
                None => text.as_bytes().to_vec(),
            };
            records.push(BarcodeResult::new(format, text, bytes));
        }
        Ok(records)
    }
}

impl DecodingEngine for FixtureEngine {
    fn apply_template(&mut self, template: &DecodeTemplate) -> Result<(), ErrorCode> {
        if template.name().is_empty() {
            return Err(ErrorCode::TEMPLATE_NAME_INVALID);
        }
        if let Some(regions) = &template.region_definition_array {
            if regions.is_empty() {
                return Err(ErrorCode::CUSTOM_REGION_INVALID);
            }
            for region in regions {
                if region.left > region.right || region.top > region.bottom {
                    return Err(ErrorCode::CUSTOM_REGION_INVALID);
                }
            }
        }
        self.applied = Some(template.name().to_string());
        Ok(())
    }

    fn decode_file(&mut self, path: &Path, template_name: &str) -> ErrorCode {
        if self.applied.as_deref() != Some(template_name) {
            return ErrorCode::TEMPLATE_NAME_INVALID;
        }
        if !path.exists() {
            return ErrorCode::FILE_NOT_FOUND;
        }

        let sidecar = path.with_extension("txt");
        let contents = match fs::read_to_string(&sidecar) {
            Ok(contents) => contents,
            Err(_) => {
                debug!(sidecar = %sidecar.display(), "no label file, reporting zero results");
                self.pending = Vec::new();
                return ErrorCode::OK;
            }
        };

        match Self::parse_labels(&contents) {
            Ok(records) => {
                debug!(count = records.len(), sidecar = %sidecar.display(), "loaded label records");
                self.pending = records;
                ErrorCode::OK
            }
            Err(code) => code,
        }
    }

    fn fetch_results(&mut self) -> ResultSet {
        ResultSet::new(std::mem::take(&mut self.pending))
    }

    fn release_results(&mut self, _results: ResultSet) {}
}
