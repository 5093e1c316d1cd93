use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use idconv::cli::output::{
    print_copy_failure, print_copy_skipped, print_copy_success, print_report, OutputFormat,
};
use idconv::clipboard::{self, ClipboardBackend};
use idconv::config::Overrides;
use idconv::session::CopyOutcome;
use idconv::{cli, Config, ConversionDirection, Converter, OutputField, Session};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "idconv")]
#[command(version, about = "Convert between emails and @id mentions", long_about = None)]
struct Cli {
    /// Emails or ids, separated by newlines, commas, semicolons or spaces
    #[arg(value_name = "INPUT")]
    input: Vec<String>,

    /// Read input from a file instead of arguments or stdin
    #[arg(short, long, conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Conversion mode (email-to-id, id-to-email)
    #[arg(short, long)]
    mode: Option<ConversionDirection>,

    /// Notice title
    #[arg(short, long, default_value = "")]
    title: String,

    /// Notice description
    #[arg(short, long, default_value = "")]
    description: String,

    /// Email domain used for bare ids
    #[arg(long, env = "IDCONV_DOMAIN")]
    domain: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Copy one output to the clipboard (id, at-id, at-id-space, email, notice)
    #[arg(short, long, value_name = "FIELD")]
    copy: Option<OutputField>,

    /// Clipboard backend (system, osc52)
    #[arg(long)]
    clipboard: Option<ClipboardBackend>,

    /// Prompt for input and copy results interactively
    #[arg(short, long)]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, !cli.no_color);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "idconv", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(Overrides {
        domain: cli.domain.clone(),
        direction: cli.mode,
        clipboard: cli.clipboard,
        no_color: cli.no_color,
    })?;
    if !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(config.direction);
    session.title = cli.title.clone();
    session.description = cli.description.clone();

    if cli.interactive {
        if !cli.input.is_empty() {
            session.input = cli.input.join("\n");
        }
        return cli::interactive::run(&config, session);
    }

    session.input = read_input(&cli)?;

    let converter = Converter::new(config.domain.as_str());
    if !session.convert(&converter) {
        return Ok(());
    }

    print_report(&session, &cli.format, config.color)?;

    if let Some(field) = cli.copy {
        let mut clipboard = clipboard::open(config.clipboard);
        match session.copy(field, clipboard.as_mut(), Instant::now()) {
            Ok(CopyOutcome::Copied) => print_copy_success(field, config.color),
            Ok(CopyOutcome::Skipped) => print_copy_skipped(field, config.color),
            Err(e) => {
                tracing::debug!(%field, error = %e, "clipboard write failed");
                print_copy_failure(field, &e, config.color);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(color && io::stderr().is_terminal())
        .init();
}

fn read_input(cli: &Cli) -> Result<String> {
    if !cli.input.is_empty() {
        return Ok(cli.input.join("\n"));
    }

    if let Some(path) = &cli.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No input given. Pass emails or ids as arguments, use --file, or pipe them in.");
    }

    let mut raw = String::new();
    stdin
        .lock()
        .read_to_string(&mut raw)
        .context("Failed to read stdin")?;
    Ok(raw)
}
