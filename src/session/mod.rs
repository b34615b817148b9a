//! Interactive decode session
//!
//! One loop iteration is one decode: prompt for an image path, negotiate
//! the detection region, build a fresh template, run a fresh engine, and
//! report the outcome. Nothing survives between iterations except the
//! prompt streams themselves.

pub mod selector;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::engine::DecodingEngine;
use crate::format::format_outcome;
use crate::invoker::decode_with_template;
use crate::template::build_template;

pub use selector::{PromptOutcome, RegionSelection, select_region};
use selector::{is_quit, read_trimmed_line};

/// A repeatable prompt-configure-decode-report loop
///
/// Generic over the prompt streams so transcripts are testable, and over
/// an engine factory so every iteration decodes under a fresh engine
/// session.
pub struct Session<R, W, F> {
    input: R,
    output: W,
    make_engine: F,
}

impl<R, W, E, F> Session<R, W, F>
where
    R: BufRead,
    W: Write,
    E: DecodingEngine,
    F: FnMut() -> E,
{
    /// Create a session over the given streams and engine factory
    pub fn new(input: R, output: W, make_engine: F) -> Self {
        Self {
            input,
            output,
            make_engine,
        }
    }

    /// Drive decode cycles until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "*************************************************")?;
        writeln!(self.output, "Welcome to the barcode region decode session")?;
        writeln!(self.output, "*************************************************")?;
        writeln!(
            self.output,
            "Hints: Please input 'Q' or 'q' to quit the application."
        )?;

        loop {
            let path = match self.prompt_image_path()? {
                PromptOutcome::Accepted(path) => path,
                PromptOutcome::Exit => break,
            };
            let selection = match select_region(&mut self.input, &mut self.output)? {
                PromptOutcome::Accepted(selection) => selection,
                PromptOutcome::Exit => break,
            };

            let (mode, region) = selection.into_parts();
            let template = match build_template(mode, region) {
                Ok(template) => template,
                Err(err) => {
                    // The selector always supplies a rectangle in manual
                    // mode, so this only fires for programmatic misuse.
                    writeln!(self.output, "Failed to build the decode template: {err}")?;
                    continue;
                }
            };

            debug!(image = %path.display(), template = template.name(), "starting decode cycle");
            let mut engine = (self.make_engine)();
            let outcome = decode_with_template(&mut engine, &path, &template);
            write!(self.output, "{}", format_outcome(&outcome))?;
        }

        Ok(())
    }

    /// Prompt until a readable image path (or quit) is supplied
    ///
    /// A path may be wrapped in single quotes, as pasted from a file
    /// manager; validation opens the file for reading.
    fn prompt_image_path(&mut self) -> io::Result<PromptOutcome<PathBuf>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, ">> Step 1: Input your image file's full path:")?;
            let Some(line) = read_trimmed_line(&mut self.input)? else {
                return Ok(PromptOutcome::Exit);
            };
            if is_quit(&line) {
                return Ok(PromptOutcome::Exit);
            }

            let path = PathBuf::from(strip_single_quotes(&line));
            if File::open(&path).is_ok() {
                return Ok(PromptOutcome::Accepted(path));
            }
            writeln!(self.output, "Please input a valid path.")?;
        }
    }
}

/// Strip one pair of wrapping single quotes, if present
fn strip_single_quotes(line: &str) -> &str {
    line.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixture::FixtureEngine;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn write_temp_image() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("region_scan_session_{nanos}_{sequence}.png"));
        fs::write(&path, b"image bytes").expect("failed to write temp image");
        path
    }

    fn run_session(script: String) -> String {
        let mut output = Vec::new();
        let mut session = Session::new(Cursor::new(script), &mut output, FixtureEngine::new);
        session.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_quit_at_path_prompt() {
        let transcript = run_session("Q\n".to_string());
        assert!(transcript.contains("Welcome to the barcode region decode session"));
        assert!(transcript.contains(">> Step 1: Input your image file's full path:"));
        assert!(!transcript.contains("No barcode found"));
    }

    #[test]
    fn test_invalid_path_reprompts() {
        let path = write_temp_image();
        let script = format!("/definitely/not/here.png\n{}\nQ\n", path.display());
        let transcript = run_session(script);
        assert!(transcript.contains("Please input a valid path."));
        // The valid path moved the session on to the region prompt.
        assert!(transcript.contains("Whether to set the detection region"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_quoted_path_is_accepted() {
        let path = write_temp_image();
        let script = format!("'{}'\nn\nq\n", path.display());
        let transcript = run_session(script);
        assert!(!transcript.contains("Please input a valid path."));
        assert!(transcript.contains("No barcode found."));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_strip_single_quotes() {
        assert_eq!(strip_single_quotes("'/tmp/x.png'"), "/tmp/x.png");
        assert_eq!(strip_single_quotes("/tmp/x.png"), "/tmp/x.png");
        assert_eq!(strip_single_quotes("'unbalanced"), "'unbalanced");
        assert_eq!(strip_single_quotes("'"), "'");
    }
}
