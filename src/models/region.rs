use thiserror::Error;

/// How the decode search space is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Let the engine predetect the barcode region automatically
    AutoRegion,
    /// Restrict the search to a caller-supplied rectangle
    ManualRegion,
}

/// Error raised when a comma-separated rectangle line is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionParseError {
    /// Fewer than four comma-separated values were supplied
    #[error("expected 4 comma-separated values, got {got}")]
    MissingFields {
        /// Number of values actually present on the line
        got: usize,
    },
    /// A value could not be parsed as a signed integer
    #[error("invalid coordinate {token:?}")]
    InvalidNumber {
        /// The offending token, as typed
        token: String,
    },
}

/// Detection region expressed as percentages of the image dimensions
///
/// Values between 0 and 100 are meaningful to the engine; out-of-range
/// values are accepted as-is and never clamped. A rectangle only exists
/// once all four coordinates parsed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRect {
    /// Left edge in percent
    pub left: i32,
    /// Top edge in percent
    pub top: i32,
    /// Right edge in percent
    pub right: i32,
    /// Bottom edge in percent
    pub bottom: i32,
}

impl RegionRect {
    /// Create a rectangle from explicit coordinates
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Parse a rectangle from a `left,top,right,bottom` line
    ///
    /// The first four comma-separated tokens are parsed as integers; tokens
    /// beyond the fourth are ignored. Fewer than four tokens, or a token
    /// that is not an integer, is an error rather than a default value.
    pub fn from_comma_list(line: &str) -> Result<Self, RegionParseError> {
        let mut coords = [0i32; 4];
        let mut parsed = 0usize;

        for token in line.split(',') {
            if parsed == coords.len() {
                break;
            }
            let token = token.trim();
            coords[parsed] = token
                .parse::<i32>()
                .map_err(|_| RegionParseError::InvalidNumber {
                    token: token.to_string(),
                })?;
            parsed += 1;
        }

        if parsed < coords.len() {
            return Err(RegionParseError::MissingFields { got: parsed });
        }

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }
}
