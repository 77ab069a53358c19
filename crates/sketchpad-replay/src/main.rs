//! Replay a JSON input script through the editor and print a summary.
//!
//! Usage: `sketchpad-replay <script.json> [--config <config.json>]`

use sketchpad_core::EditorConfig;
use sketchpad_replay::{ReplayResult, Script, Summary, run};
use std::env;
use std::process::ExitCode;

struct Args {
    script: String,
    config: Option<String>,
}

fn parse_args() -> Option<Args> {
    let mut args = env::args().skip(1);
    let mut script = None;
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next()?),
            _ if script.is_none() => script = Some(arg),
            _ => return None,
        }
    }
    Some(Args {
        script: script?,
        config,
    })
}

fn replay(args: &Args) -> ReplayResult<Summary> {
    let script = Script::load(&args.script)?;
    let config = args.config.as_deref().map(EditorConfig::load).transpose()?;
    log::info!("Replaying {} step(s) from {}", script.steps.len(), args.script);
    let editor = run(&script, config);
    Ok(Summary::of(&editor))
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_args() else {
        eprintln!("usage: sketchpad-replay <script.json> [--config <config.json>]");
        return ExitCode::from(2);
    };

    match replay(&args) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
