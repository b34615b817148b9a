//! Decoding configuration templates
//!
//! The engine consumes a named, versioned JSON document describing how to
//! search an image: which symbologies to try, whether to predetect the
//! barcode region, and (in manual mode) the exact region rectangle. This
//! module builds those documents from a [`DecodeMode`] plus an optional
//! [`RegionRect`], and round-trips them through JSON for replay.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DecodeMode, RegionRect};

/// Template name used for automatic region predetection
pub const AUTO_TEMPLATE_NAME: &str = "ALL_DEFAULT";
/// Template name used when the region is supplied manually
pub const REGION_TEMPLATE_NAME: &str = "All_DEFAULT_WITHREGION";

/// Wire format version tag understood by the engine
const TEMPLATE_VERSION: &str = "2.0";
/// Name of the single region definition in manual mode
const REGION_NAME: &str = "Region";
/// Predetection mode: estimate the barcode area from RGB contrast
const PREDETECT_CONTRAST: &str = "RPM_GENERAL_RGB_CONTRAST";
/// Predetection mode: plain general search, no predetection
const PREDETECT_GENERAL: &str = "RPM_GENERAL";
/// Symbology filter covering every format the engine knows
const FORMATS_ALL: &str = "BF_ALL";

/// Error raised when a template cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Manual mode was requested without a region rectangle
    #[error("manual region mode requires a region rectangle")]
    MissingRegion,
}

/// One entry of the region predetection mode list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredetectionMode {
    /// Engine mode identifier
    pub mode: String,
}

/// The image parameter block of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageParameter {
    /// Template name the engine is later addressed with
    pub name: String,
    /// Symbology filter list
    pub barcode_format_ids: Vec<String>,
    /// Region predetection strategy entries
    pub region_predetection_modes: Vec<PredetectionMode>,
    /// Names of the region definitions in effect (manual mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_definition_name_array: Option<Vec<String>>,
}

/// A named detection region, measured in percentages of the image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionDefinition {
    /// Region name referenced from the image parameter block
    pub name: String,
    /// 1 when coordinates are percentages rather than pixels
    pub measured_by_percentage: i32,
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

/// A complete decoding configuration document
///
/// Immutable once built; constructed fresh for every decode call and
/// consumed exactly once by the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecodeTemplate {
    /// Wire format version tag
    pub version: String,
    /// Search parameters for the image
    pub image_parameter: ImageParameter,
    /// Region definitions (manual mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_definition_array: Option<Vec<RegionDefinition>>,
}

impl DecodeTemplate {
    /// Name under which the engine addresses this template
    pub fn name(&self) -> &str {
        &self.image_parameter.name
    }

    /// Serialize to the JSON wire format
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a template from its JSON wire format
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Build a decoding configuration for the given mode
///
/// Auto mode enables contrast-based region predetection; manual mode
/// carries exactly one percentage-measured region equal to `region`.
/// Pure: the output is fully determined by the inputs.
pub fn build_template(
    mode: DecodeMode,
    region: Option<RegionRect>,
) -> Result<DecodeTemplate, TemplateError> {
    match mode {
        DecodeMode::AutoRegion => Ok(DecodeTemplate {
            version: TEMPLATE_VERSION.to_string(),
            image_parameter: ImageParameter {
                name: AUTO_TEMPLATE_NAME.to_string(),
                barcode_format_ids: vec![FORMATS_ALL.to_string()],
                region_predetection_modes: vec![PredetectionMode {
                    mode: PREDETECT_CONTRAST.to_string(),
                }],
                region_definition_name_array: None,
            },
            region_definition_array: None,
        }),
        DecodeMode::ManualRegion => {
            let rect = region.ok_or(TemplateError::MissingRegion)?;
            Ok(DecodeTemplate {
                version: TEMPLATE_VERSION.to_string(),
                image_parameter: ImageParameter {
                    name: REGION_TEMPLATE_NAME.to_string(),
                    barcode_format_ids: vec![FORMATS_ALL.to_string()],
                    region_predetection_modes: vec![PredetectionMode {
                        mode: PREDETECT_GENERAL.to_string(),
                    }],
                    region_definition_name_array: Some(vec![REGION_NAME.to_string()]),
                },
                region_definition_array: Some(vec![RegionDefinition {
                    name: REGION_NAME.to_string(),
                    measured_by_percentage: 1,
                    left: rect.left,
                    top: rect.top,
                    right: rect.right,
                    bottom: rect.bottom,
                }]),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_auto_template_is_deterministic() {
        let a = build_template(DecodeMode::AutoRegion, None).unwrap();
        let b = build_template(DecodeMode::AutoRegion, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), AUTO_TEMPLATE_NAME);
    }

    #[test]
    fn test_auto_template_wire_format() {
        let template = build_template(DecodeMode::AutoRegion, None).unwrap();
        let value: Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "Version": "2.0",
                "ImageParameter": {
                    "Name": "ALL_DEFAULT",
                    "BarcodeFormatIds": ["BF_ALL"],
                    "RegionPredetectionModes": [{"Mode": "RPM_GENERAL_RGB_CONTRAST"}]
                }
            })
        );
    }

    #[test]
    fn test_manual_template_wire_format() {
        let rect = RegionRect::new(10, 20, 90, 80);
        let template = build_template(DecodeMode::ManualRegion, Some(rect)).unwrap();
        let value: Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "Version": "2.0",
                "ImageParameter": {
                    "Name": "All_DEFAULT_WITHREGION",
                    "BarcodeFormatIds": ["BF_ALL"],
                    "RegionPredetectionModes": [{"Mode": "RPM_GENERAL"}],
                    "RegionDefinitionNameArray": ["Region"]
                },
                "RegionDefinitionArray": [{
                    "Name": "Region",
                    "MeasuredByPercentage": 1,
                    "Left": 10,
                    "Top": 20,
                    "Right": 90,
                    "Bottom": 80
                }]
            })
        );
    }

    #[test]
    fn test_manual_template_requires_region() {
        assert_eq!(
            build_template(DecodeMode::ManualRegion, None),
            Err(TemplateError::MissingRegion)
        );
    }

    #[test]
    fn test_manual_template_keeps_coordinates_exact() {
        // No clamping, even for values outside the 0-100 convention.
        let rect = RegionRect::new(-5, 0, 120, i32::MAX);
        let template = build_template(DecodeMode::ManualRegion, Some(rect)).unwrap();
        let regions = template.region_definition_array.as_ref().unwrap();
        assert_eq!(regions[0].left, -5);
        assert_eq!(regions[0].right, 120);
        assert_eq!(regions[0].bottom, i32::MAX);
    }

    #[test]
    fn test_json_round_trip() {
        let rect = RegionRect::new(10, 10, 90, 90);
        let template = build_template(DecodeMode::ManualRegion, Some(rect)).unwrap();
        let json = template.to_json().unwrap();
        let parsed = DecodeTemplate::from_json(&json).unwrap();
        assert_eq!(parsed, template);
    }
}
