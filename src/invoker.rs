//! Timed decode orchestration
//!
//! Drives one engine through one decode: apply the template, run the
//! decode call under a wall-clock measurement, classify the return code
//! once, and pull the results out under the release guard.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::engine::{DecodingEngine, FetchedResults};
use crate::models::DecodeOutcome;
use crate::template::DecodeTemplate;

/// Decode one image file under a configuration template
///
/// If the engine rejects the template the decode call is never attempted.
/// The elapsed time strictly brackets the decode call itself; template
/// application is excluded. The fetched result set is released on every
/// exit path.
pub fn decode_with_template<E: DecodingEngine + ?Sized>(
    engine: &mut E,
    image_path: &Path,
    template: &DecodeTemplate,
) -> DecodeOutcome {
    if let Err(code) = engine.apply_template(template) {
        debug!(%code, template = template.name(), "template application rejected");
        let message = engine.error_message(code);
        return DecodeOutcome::Failed { code, message };
    }

    let start = Instant::now();
    let code = engine.decode_file(image_path, template.name());
    let elapsed = start.elapsed();
    debug!(%code, ?elapsed, image = %image_path.display(), "decode call finished");

    if code.is_feature_limited() {
        // Reported as zero results; the result set is not even fetched
        // (Scenario D: whatever it holds must not leak to the user).
        return DecodeOutcome::LicenseLimited { code, elapsed };
    }
    if !code.is_ok() {
        let message = engine.error_message(code);
        return DecodeOutcome::Failed { code, message };
    }

    let fetched = FetchedResults::fetch(engine);
    let results = fetched.records().to_vec();
    drop(fetched);

    if results.is_empty() {
        DecodeOutcome::Empty { elapsed }
    } else {
        DecodeOutcome::Success { results, elapsed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ErrorCode, ResultSet};
    use crate::models::{BarcodeResult, DecodeMode};
    use crate::template::build_template;

    /// Engine scripted to return fixed answers while counting calls
    struct ScriptedEngine {
        apply_result: Result<(), ErrorCode>,
        decode_code: ErrorCode,
        records: Vec<BarcodeResult>,
        decode_calls: usize,
        fetched: usize,
        released: usize,
    }

    impl ScriptedEngine {
        fn new(apply_result: Result<(), ErrorCode>, decode_code: ErrorCode) -> Self {
            Self {
                apply_result,
                decode_code,
                records: Vec::new(),
                decode_calls: 0,
                fetched: 0,
                released: 0,
            }
        }
    }

    impl DecodingEngine for ScriptedEngine {
        fn apply_template(&mut self, _template: &DecodeTemplate) -> Result<(), ErrorCode> {
            self.apply_result
        }

        fn decode_file(&mut self, _path: &Path, _template_name: &str) -> ErrorCode {
            self.decode_calls += 1;
            self.decode_code
        }

        fn fetch_results(&mut self) -> ResultSet {
            self.fetched += 1;
            ResultSet::new(self.records.clone())
        }

        fn release_results(&mut self, _results: ResultSet) {
            self.released += 1;
        }
    }

    fn auto_template() -> DecodeTemplate {
        build_template(DecodeMode::AutoRegion, None).unwrap()
    }

    #[test]
    fn test_apply_failure_skips_decode_call() {
        let mut engine =
            ScriptedEngine::new(Err(ErrorCode::JSON_PARSE_FAILED), ErrorCode::OK);
        let outcome = decode_with_template(&mut engine, Path::new("x.png"), &auto_template());
        assert_eq!(engine.decode_calls, 0);
        assert_eq!(
            outcome,
            DecodeOutcome::Failed {
                code: ErrorCode::JSON_PARSE_FAILED,
                message: "Failed to parse the JSON template.".to_string(),
            }
        );
    }

    #[test]
    fn test_license_limited_code_skips_fetch() {
        let mut engine = ScriptedEngine::new(Ok(()), ErrorCode::MAXICODE_LICENSE_INVALID);
        engine.records = vec![BarcodeResult::new("MAXICODE", "leak?", vec![1])];
        let outcome = decode_with_template(&mut engine, Path::new("x.png"), &auto_template());
        assert!(matches!(
            outcome,
            DecodeOutcome::LicenseLimited {
                code: ErrorCode::MAXICODE_LICENSE_INVALID,
                ..
            }
        ));
        assert_eq!(engine.fetched, 0);
    }

    #[test]
    fn test_fatal_code_reports_engine_message() {
        let mut engine = ScriptedEngine::new(Ok(()), ErrorCode::FILE_NOT_FOUND);
        let outcome = decode_with_template(&mut engine, Path::new("x.png"), &auto_template());
        assert_eq!(
            outcome,
            DecodeOutcome::Failed {
                code: ErrorCode::FILE_NOT_FOUND,
                message: "The file is not found.".to_string(),
            }
        );
        assert_eq!(engine.fetched, 0);
    }

    #[test]
    fn test_success_preserves_order_and_releases() {
        let mut engine = ScriptedEngine::new(Ok(()), ErrorCode::OK);
        engine.records = vec![
            BarcodeResult::new("QR_CODE", "first", vec![1]),
            BarcodeResult::new("CODE_128", "second", vec![2]),
        ];
        let outcome = decode_with_template(&mut engine, Path::new("x.png"), &auto_template());
        match outcome {
            DecodeOutcome::Success { results, .. } => {
                assert_eq!(results[0].text, "first");
                assert_eq!(results[1].text, "second");
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(engine.fetched, 1);
        assert_eq!(engine.released, 1);
    }

    #[test]
    fn test_empty_result_set_releases() {
        let mut engine = ScriptedEngine::new(Ok(()), ErrorCode::OK);
        let outcome = decode_with_template(&mut engine, Path::new("x.png"), &auto_template());
        assert!(matches!(outcome, DecodeOutcome::Empty { .. }));
        assert_eq!(engine.fetched, 1);
        assert_eq!(engine.released, 1);
    }
}
