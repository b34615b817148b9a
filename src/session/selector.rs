//! Region selector state machine
//!
//! Negotiates the decode mode over line-oriented streams: first whether to
//! set a detection region at all, then (for manual mode) the rectangle
//! itself. Every prompting state accepts a bare `q`/`Q` as a quit request,
//! and invalid input re-prompts without ever terminating the selector.

use std::io::{self, BufRead, Write};

use tracing::trace;

use crate::models::{DecodeMode, RegionRect};

/// Outcome of an interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    /// The user supplied a valid answer
    Accepted(T),
    /// The user asked to quit; propagates to the session loop
    Exit,
}

/// The user's region choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSelection {
    /// Let the engine predetect the barcode region
    Auto,
    /// Search only the given rectangle
    Manual(RegionRect),
}

impl RegionSelection {
    /// Split into the inputs the template builder expects
    pub fn into_parts(self) -> (DecodeMode, Option<RegionRect>) {
        match self {
            RegionSelection::Auto => (DecodeMode::AutoRegion, None),
            RegionSelection::Manual(rect) => (DecodeMode::ManualRegion, Some(rect)),
        }
    }
}

/// Selector states; quit is reachable from every prompting state
enum SelectorState {
    AskMode,
    AskRegion,
    Done(RegionSelection),
    Exit,
}

/// Interactively choose the decode mode and, if manual, the rectangle
pub fn select_region<R, W>(
    input: &mut R,
    output: &mut W,
) -> io::Result<PromptOutcome<RegionSelection>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut state = SelectorState::AskMode;
    loop {
        state = match state {
            SelectorState::AskMode => {
                write!(output, "Whether to set the detection region (Y:Yes/N:No)? ")?;
                output.flush()?;
                match read_trimmed_line(input)? {
                    None => SelectorState::Exit,
                    Some(line) if is_quit(&line) => SelectorState::Exit,
                    Some(line) => match line.to_ascii_lowercase().as_str() {
                        "n" | "no" => SelectorState::Done(RegionSelection::Auto),
                        "y" | "yes" => SelectorState::AskRegion,
                        _ => {
                            writeln!(output, "Please input a valid value.")?;
                            SelectorState::AskMode
                        }
                    },
                }
            }
            SelectorState::AskRegion => {
                writeln!(
                    output,
                    "Set left, top, right, bottom value (in percentage) of your region rectangle, e.g. 10,10,90,90:"
                )?;
                match read_trimmed_line(input)? {
                    None => SelectorState::Exit,
                    Some(line) if is_quit(&line) => SelectorState::Exit,
                    Some(line) => match RegionRect::from_comma_list(&line) {
                        Ok(rect) => SelectorState::Done(RegionSelection::Manual(rect)),
                        Err(err) => {
                            trace!(%err, %line, "rejected rectangle input");
                            writeln!(output, "Please input a valid rect.")?;
                            SelectorState::AskRegion
                        }
                    },
                }
            }
            SelectorState::Done(selection) => return Ok(PromptOutcome::Accepted(selection)),
            SelectorState::Exit => return Ok(PromptOutcome::Exit),
        };
    }
}

/// Read one line, trimmed; `None` means the input stream ended
pub(crate) fn read_trimmed_line<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// The quit sentinel is a bare `q` or `Q`
pub(crate) fn is_quit(line: &str) -> bool {
    line == "q" || line == "Q"
}
