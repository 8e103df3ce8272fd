//! eSupport intake - command-line shell
//!
//! Reads a form submission (flat JSON object of field values) and the
//! requester's environment, runs it through the intake pipeline and prints
//! the status message followed by the machine-readable payload.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use esupport::{
    EnvironmentDescriptor, EsupportConfig, LoggingYamlConfig, RawFields, routing_notice,
    hydrated_fields, submit_with_config, visibility_for,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "esupport", version, about = "Capture a help-desk request")]
struct Cli {
    /// JSON file with the form fields; `-` reads standard input.
    #[arg(long, required_unless_present = "notice")]
    fields: Option<PathBuf>,

    /// Client environment signature (user-agent string).
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Page the form was submitted from.
    #[arg(long, default_value = "")]
    page_url: String,

    #[arg(long)]
    referrer: Option<String>,

    /// YAML configuration file; defaults apply when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print the routing notice and exit.
    #[arg(long)]
    notice: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = EsupportConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logging);

    if cli.notice {
        println!("{}", routing_notice(&config.routing_config()));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(path) = cli.fields.as_ref() else {
        anyhow::bail!("--fields is required");
    };
    let mut descriptor = EnvironmentDescriptor::new(cli.user_agent, cli.page_url);
    descriptor.referrer = cli.referrer;

    let fields = hydrated_fields(read_fields(path)?, &descriptor);

    tracing::debug!(visibility = ?visibility_for(&fields), "form_state");

    match submit_with_config(&fields, &descriptor, &config) {
        Ok(outcome) => {
            println!("{}", outcome.status.message);
            println!("{}", outcome.status.payload_json);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_user_facing() => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("submission rejected"),
    }
}

fn read_fields(path: &Path) -> anyhow::Result<RawFields> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading fields from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&raw).context("fields must be a flat JSON object of strings")
}

fn init_tracing(logging: &LoggingYamlConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
