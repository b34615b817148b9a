use clap::Parser;
use region_scan::engine::fixture::FixtureEngine;
use region_scan::format::format_outcome;
use region_scan::invoker::decode_with_template;
use region_scan::{
    DecodeMode, DecodeOutcome, DecodeTemplate, RegionRect, Session, build_template, logging,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "regionscan", version, about = "Region-aware barcode decode session")]
struct Cli {
    /// Decode a single image and exit instead of starting the session
    #[arg(long)]
    image: Option<PathBuf>,
    /// Region rectangle as left,top,right,bottom percentages
    #[arg(long, requires = "image", conflicts_with = "template")]
    region: Option<String>,
    /// Decode under a template document loaded from a JSON file
    #[arg(long, requires = "image")]
    template: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match cli.image {
        Some(image) => one_shot_cmd(&image, cli.region.as_deref(), cli.template.as_deref()),
        None => interactive_cmd(),
    }
}

fn interactive_cmd() -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), FixtureEngine::new);
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Session failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn one_shot_cmd(image: &Path, region: Option<&str>, template_path: Option<&Path>) -> ExitCode {
    let template = match load_template(region, template_path) {
        Ok(template) => template,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = FixtureEngine::new();
    let outcome = decode_with_template(&mut engine, image, &template);
    print!("{}", format_outcome(&outcome));

    if matches!(outcome, DecodeOutcome::Failed { .. }) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_template(
    region: Option<&str>,
    template_path: Option<&Path>,
) -> Result<DecodeTemplate, String> {
    if let Some(path) = template_path {
        let json = std::fs::read_to_string(path)
            .map_err(|err| format!("Failed to read template {}: {err}", path.display()))?;
        return DecodeTemplate::from_json(&json)
            .map_err(|err| format!("Failed to parse template {}: {err}", path.display()));
    }

    let (mode, rect) = match region {
        Some(value) => {
            let rect = RegionRect::from_comma_list(value)
                .map_err(|err| format!("Invalid --region value: {err}"))?;
            (DecodeMode::ManualRegion, Some(rect))
        }
        None => (DecodeMode::AutoRegion, None),
    };
    build_template(mode, rect).map_err(|err| format!("Failed to build the decode template: {err}"))
}
