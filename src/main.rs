// Copyright 2026 Cornell University
// released under MIT License

use anyhow::{anyhow, Context};
use clap::{ColorChoice, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use custom_radix::diagnostic::DiagnosticHandler;
use custom_radix::emit::write_outputs;
use custom_radix::ir::Job;
use custom_radix::request::{parse_viewer_list, placeholders, run};
use log::LevelFilter;
use std::path::PathBuf;

// From the top-level directory, run:
// $ cargo run -- tests/jobs/fsm.json --viewers json,verdi,gtkwave --out-dir radix

/// Args for the custom radix CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a job file (JSON with `definitions` and `associations`)
    #[arg(value_name = "JOB_FILE")]
    job: PathBuf,

    /// Comma separated list of outputs to produce: json, verdi, gtkwave
    #[arg(long, value_name = "VIEWERS", default_value = "json")]
    viewers: String,

    /// Directory the generated files are written to
    #[arg(short, long, value_name = "OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Users can specify `-v` or `--verbose` to toggle logging
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// To suppress colors in error messages, pass in `--color never`
    #[arg(long, value_name = "COLOR_CHOICE", default_value = "auto")]
    color: ColorChoice,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // For concision, we disable timestamps in the log
    let mut logger = env_logger::Builder::new();
    logger
        .format_timestamp(None)
        .filter_level(cli.verbosity.log_level_filter());
    if cli.color == ColorChoice::Never {
        logger.write_style(env_logger::WriteStyle::Never);
    }
    logger.init();

    // the unused alias warnings are only interesting with `--verbose`
    let emit_warnings = cli.verbosity.log_level_filter() >= LevelFilter::Info;
    let mut handler = DiagnosticHandler::new(cli.color, true);

    // reject unknown viewers before doing any work
    let viewers = match parse_viewer_list(&cli.viewers) {
        Ok(viewers) => viewers,
        Err(e) => {
            handler.emit_radix_error(&e);
            return Err(anyhow!("invalid --viewers argument"));
        }
    };

    let source = std::fs::read_to_string(&cli.job)
        .with_context(|| format!("failed to read job file {}", cli.job.display()))?;
    let fileid = handler.add_file(cli.job.display().to_string(), source.clone());
    let job: Job = match serde_json::from_str(&source) {
        Ok(job) => job,
        Err(e) => {
            handler.emit_json_error(fileid, &e);
            return Err(anyhow!("failed to parse job file {}", cli.job.display()));
        }
    };

    if emit_warnings {
        handler.emit_unused_definitions(&job);
    }

    let requests = match run(&job, &placeholders(&viewers)) {
        Ok(requests) => requests,
        Err(e) => {
            handler.emit_radix_error(&e);
            return Err(anyhow!("custom radix generation failed"));
        }
    };
    let written = write_outputs(&cli.out_dir, &requests)
        .with_context(|| format!("failed to write outputs to {}", cli.out_dir.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
