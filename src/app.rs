use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use thiserror::Error;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat};
use crate::patcher;
use crate::payload::PayloadSource;
use crate::runner::{Options, PatchStatus, Runner, RunnerError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Run(#[from] RunnerError),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Run(_) => 1,
        }
    }
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        AppError::Usage(message)
    }
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    out.push_str(cmd.get_name());
    if let Some(version) = cmd.get_version() {
        out.push(' ');
        out.push_str(version);
    }
    out.push('\n');

    if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Usage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS]\n\n");

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }

        let heading = arg.get_help_heading().unwrap_or("Options").to_string();

        let idx = match section_idx.get(&heading).copied() {
            Some(i) => i,
            None => {
                sections.push((heading.clone(), Vec::new()));
                let i = sections.len() - 1;
                section_idx.insert(heading, i);
                i
            }
        };

        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");

        for arg in args {
            let mut parts: Vec<String> = Vec::new();

            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }
            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    let rendered = format!("--{alias}");
                    if !parts.iter().any(|p| p == &rendered) {
                        parts.push(rendered);
                    }
                }
            }

            let mut flags = parts.join(", ");

            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                flags.push_str(&format!(" <{value_name}>"));
            }

            out.push_str("  ");
            out.push_str(&flags);
            out.push('\n');

            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str("          ");
                    out.push_str(help.trim());
                    out.push('\n');
                }
            }

            out.push('\n');
        }
    }

    out
}

#[derive(Clone, Debug)]
struct RunConfig {
    target: String,
    marker: String,
    payload: PayloadSource,
    dry_run: bool,
    skip_if_present: bool,
    output_format: OutputFormat,
    print: bool,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let target = args
        .target
        .or(cfg.target)
        .map(|p| config::expand_tilde_string(p.trim()))
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            "a target document is required (--target or 'target' in config)".to_string()
        })?;

    let marker = args
        .marker
        .or(cfg.marker)
        .unwrap_or_else(|| patcher::DEFAULT_MARKER.to_string());
    if marker.is_empty() {
        return Err("invalid marker, expected non-empty text".to_string());
    }

    // CLI payload flags replace both config payload keys.
    let payload = if let Some(path) = args.payload {
        PayloadSource::FilePath(config::expand_tilde_string(&path))
    } else if let Some(text) = args.payload_inline {
        PayloadSource::Inline(text)
    } else {
        match (cfg.payload, cfg.payload_inline) {
            (Some(_), Some(_)) => {
                return Err(
                    "use either 'payload' or 'payload_inline' in config, not both".to_string(),
                )
            }
            (Some(path), None) => PayloadSource::FilePath(config::expand_tilde_string(&path)),
            (None, Some(text)) => PayloadSource::Inline(text),
            (None, None) => PayloadSource::Embedded,
        }
    };

    let dry_run = args.dry_run || cfg.dry_run.unwrap_or(false);
    let skip_if_present = args.skip_if_present || cfg.skip_if_present.unwrap_or(false);

    let output_format_raw = args
        .output_format
        .or(cfg.output_format)
        .unwrap_or_else(|| "text".to_string());
    let output_format = OutputFormat::parse(&output_format_raw)
        .ok_or_else(|| format!("invalid output format '{output_format_raw}'"))?;

    Ok(RunConfig {
        target,
        marker,
        payload,
        dry_run,
        skip_if_present,
        output_format,
        print: args.print,
        no_color,
        verbose: args.verbose,
    })
}

/// Report lines go to stderr when stdout carries the document.
fn emit(run: &RunConfig, bytes: &[u8]) {
    if run.print {
        let _ = std::io::stderr().write_all(bytes);
    } else {
        let _ = std::io::stdout().write_all(bytes);
    }
}

fn status_line(tag: &str, message: &str) -> String {
    let tag = match tag {
        "OK" => tag.bold().green(),
        "WRN" => tag.bold().yellow(),
        _ => tag.bold().red(),
    };
    format!("{}{}{} {}\n", "[".bold().white(), tag, "]".bold().white(), message)
}

fn run_patch(run: RunConfig) -> Result<(), AppError> {
    let runner = Runner::new(Options {
        target: run.target.clone(),
        marker: run.marker.clone(),
        payload: run.payload.clone(),
        dry_run: run.dry_run,
        skip_if_present: run.skip_if_present,
    })?;

    let outcome = runner.run()?;
    let record = output::build_record(&outcome);
    emit(&run, &output::render(run.output_format, &record));

    if run.output_format == OutputFormat::Text {
        let line = match outcome.status {
            PatchStatus::Patched => status_line(
                "OK",
                &format!("inserted {} bytes into {}", outcome.payload_bytes, outcome.target),
            ),
            PatchStatus::DryRun => status_line(
                "OK",
                &format!("dry run, {} left unchanged", outcome.target),
            ),
            PatchStatus::AlreadyPresent => status_line(
                "WRN",
                &format!("payload already present in {}, nothing to do", outcome.target),
            ),
        };
        emit(&run, line.as_bytes());
    }

    if run.print {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(outcome.document.as_bytes());
        let _ = stdout.flush();
    }

    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<(), AppError> {
    let path = path
        .or_else(config::default_config_path)
        .ok_or_else(|| AppError::Usage("unable to determine home directory".to_string()))?;
    if config::ensure_default_config_file(&path)? {
        print!("{}", status_line("OK", &format!("wrote {}", path.display())));
    } else {
        print!(
            "{}",
            status_line("WRN", &format!("{} already exists", path.display()))
        );
    }
    Ok(())
}

pub fn run_cli() -> Result<(), AppError> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(AppError::Usage(e.to_string())),
        },
    };

    if args.no_color {
        colored::control::set_override(false);
    }

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    if args.init_config {
        return init_config(user_config_path);
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    if run_config.no_color {
        colored::control::set_override(false);
    }
    crate::logging::init(run_config.verbose, run_config.no_color);

    run_patch(run_config)
}

pub fn report_error(err: &AppError) {
    let message = match err {
        AppError::Run(e) if e.is_marker_not_found() => e.to_string(),
        AppError::Run(e) => format!("patch failed: {e}"),
        AppError::Usage(e) => e.clone(),
    };
    eprint!("{}", status_line("ERR", &message));
}
