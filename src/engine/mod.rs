//! Decoding engine abstraction
//!
//! The recognition engine is an external capability: it accepts a
//! configuration template, decodes an image file addressed by template
//! name, and hands back a result set that the caller must release. This
//! module defines that contract, the engine's integer error codes with
//! their classification table, and an RAII guard that pairs every fetch
//! with a release.

pub mod fixture;

use std::fmt;
use std::path::Path;

use crate::models::BarcodeResult;
use crate::template::DecodeTemplate;

/// Raw engine return code
///
/// `0` is success; everything else is an error. A fixed subset of codes
/// marks symbologies the current license does not cover — those are
/// reported to users as "no barcode found", not as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// Successful call
    pub const OK: ErrorCode = ErrorCode(0);
    /// Unclassified engine error
    pub const UNKNOWN: ErrorCode = ErrorCode(-10000);
    /// The license is not valid for this engine
    pub const LICENSE_INVALID: ErrorCode = ErrorCode(-10003);
    /// The license has expired
    pub const LICENSE_EXPIRED: ErrorCode = ErrorCode(-10004);
    /// The image file does not exist
    pub const FILE_NOT_FOUND: ErrorCode = ErrorCode(-10005);
    /// The image file type is not supported
    pub const FILETYPE_NOT_SUPPORTED: ErrorCode = ErrorCode(-10006);
    /// The configured detection region is malformed
    pub const CUSTOM_REGION_INVALID: ErrorCode = ErrorCode(-10010);
    /// The image file could not be read
    pub const IMAGE_READ_FAILED: ErrorCode = ErrorCode(-10012);
    /// QR Code symbology is not licensed
    pub const QR_LICENSE_INVALID: ErrorCode = ErrorCode(-10016);
    /// 1D symbologies are not licensed
    pub const ONED_LICENSE_INVALID: ErrorCode = ErrorCode(-10017);
    /// PDF417 symbology is not licensed
    pub const PDF417_LICENSE_INVALID: ErrorCode = ErrorCode(-10019);
    /// DataMatrix symbology is not licensed
    pub const DATAMATRIX_LICENSE_INVALID: ErrorCode = ErrorCode(-10020);
    /// The template document is not valid JSON
    pub const JSON_PARSE_FAILED: ErrorCode = ErrorCode(-10030);
    /// The template name is unknown to the engine
    pub const TEMPLATE_NAME_INVALID: ErrorCode = ErrorCode(-10036);
    /// Aztec symbology is not licensed
    pub const AZTEC_LICENSE_INVALID: ErrorCode = ErrorCode(-10041);
    /// Patch code symbology is not licensed
    pub const PATCHCODE_LICENSE_INVALID: ErrorCode = ErrorCode(-10046);
    /// MaxiCode symbology is not licensed
    pub const MAXICODE_LICENSE_INVALID: ErrorCode = ErrorCode(-10057);
    /// GS1 DataBar symbology is not licensed
    pub const GS1_DATABAR_LICENSE_INVALID: ErrorCode = ErrorCode(-10058);
    /// GS1 composite symbology is not licensed
    pub const GS1_COMPOSITE_LICENSE_INVALID: ErrorCode = ErrorCode(-10059);

    /// True for a successful call
    pub fn is_ok(self) -> bool {
        self == Self::OK
    }

    /// True when the code marks an unlicensed optional feature
    ///
    /// These decodes still report zero results to the user; the table is
    /// the single place the classification lives.
    pub fn is_feature_limited(self) -> bool {
        FEATURE_LIMITED_CODES.contains(&self)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Codes that mean "a symbology you did not pay for", not "decode broke"
pub const FEATURE_LIMITED_CODES: [ErrorCode; 10] = [
    ErrorCode::LICENSE_EXPIRED,
    ErrorCode::QR_LICENSE_INVALID,
    ErrorCode::ONED_LICENSE_INVALID,
    ErrorCode::PDF417_LICENSE_INVALID,
    ErrorCode::DATAMATRIX_LICENSE_INVALID,
    ErrorCode::AZTEC_LICENSE_INVALID,
    ErrorCode::PATCHCODE_LICENSE_INVALID,
    ErrorCode::MAXICODE_LICENSE_INVALID,
    ErrorCode::GS1_DATABAR_LICENSE_INVALID,
    ErrorCode::GS1_COMPOSITE_LICENSE_INVALID,
];

/// Human-readable description of an engine code
pub fn describe(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::OK => "Successful.",
        ErrorCode::LICENSE_INVALID => "The license is invalid.",
        ErrorCode::LICENSE_EXPIRED => "The license has expired.",
        ErrorCode::FILE_NOT_FOUND => "The file is not found.",
        ErrorCode::FILETYPE_NOT_SUPPORTED => "The file type is not supported.",
        ErrorCode::CUSTOM_REGION_INVALID => "The custom region definition is invalid.",
        ErrorCode::IMAGE_READ_FAILED => "Failed to read the image.",
        ErrorCode::QR_LICENSE_INVALID => "The QR Code license is invalid.",
        ErrorCode::ONED_LICENSE_INVALID => "The 1D barcode license is invalid.",
        ErrorCode::PDF417_LICENSE_INVALID => "The PDF417 license is invalid.",
        ErrorCode::DATAMATRIX_LICENSE_INVALID => "The DataMatrix license is invalid.",
        ErrorCode::JSON_PARSE_FAILED => "Failed to parse the JSON template.",
        ErrorCode::TEMPLATE_NAME_INVALID => "The template name is invalid.",
        ErrorCode::AZTEC_LICENSE_INVALID => "The Aztec license is invalid.",
        ErrorCode::PATCHCODE_LICENSE_INVALID => "The patch code license is invalid.",
        ErrorCode::MAXICODE_LICENSE_INVALID => "The MaxiCode license is invalid.",
        ErrorCode::GS1_DATABAR_LICENSE_INVALID => "The GS1 DataBar license is invalid.",
        ErrorCode::GS1_COMPOSITE_LICENSE_INVALID => "The GS1 composite license is invalid.",
        _ => "Unknown error.",
    }
}

/// Results handed out by [`DecodingEngine::fetch_results`]
///
/// Opaque to callers except for read access; must be handed back to the
/// engine via `release_results` (the [`FetchedResults`] guard does this
/// automatically).
#[derive(Debug)]
pub struct ResultSet {
    records: Vec<BarcodeResult>,
}

impl ResultSet {
    /// Wrap engine records into a result set
    pub fn new(records: Vec<BarcodeResult>) -> Self {
        Self { records }
    }

    /// The decoded records, in engine order
    pub fn records(&self) -> &[BarcodeResult] {
        &self.records
    }
}

/// Contract satisfied by any barcode recognition engine
///
/// Licensing and activation are assumed to have happened before the engine
/// reaches this layer.
pub trait DecodingEngine {
    /// Install a configuration template into the engine
    fn apply_template(&mut self, template: &DecodeTemplate) -> Result<(), ErrorCode>;

    /// Decode one image file under a previously applied template
    fn decode_file(&mut self, path: &Path, template_name: &str) -> ErrorCode;

    /// Hand out the results of the last decode call
    fn fetch_results(&mut self) -> ResultSet;

    /// Give a result set back to the engine
    fn release_results(&mut self, results: ResultSet);

    /// Engine-supplied description of a return code
    fn error_message(&self, code: ErrorCode) -> String {
        describe(code).to_string()
    }
}

/// Scoped access to a fetched result set
///
/// Releases the set back to the engine when dropped, so every exit path
/// out of the invoker returns the handle exactly once.
pub struct FetchedResults<'e, E: DecodingEngine + ?Sized> {
    engine: &'e mut E,
    set: Option<ResultSet>,
}

impl<'e, E: DecodingEngine + ?Sized> FetchedResults<'e, E> {
    /// Fetch the engine's current results under guard
    pub fn fetch(engine: &'e mut E) -> Self {
        let set = engine.fetch_results();
        Self {
            engine,
            set: Some(set),
        }
    }

    /// The decoded records, in engine order
    pub fn records(&self) -> &[BarcodeResult] {
        self.set.as_ref().map(ResultSet::records).unwrap_or(&[])
    }
}

impl<E: DecodingEngine + ?Sized> Drop for FetchedResults<'_, E> {
    fn drop(&mut self) {
        if let Some(set) = self.set.take() {
            self.engine.release_results(set);
        }
    }
}
