//! WHOIS Lookup CLI Application
//!
//! A command-line front end for whois-lookup-lib: look up one domain and
//! show its registration and contact details, either once or from an
//! interactive prompt.

mod prompt;
mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use prompt::{parse_command, Command};
use std::process;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use whois_lookup_lib::{
    load_env_config, parse_timeout_string, ConfigManager, DisplayMode, LookupConfig, LookupError,
    LookupSession, SubmitOutcome, WhoisXmlClient,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Exit status when a lookup or configuration fails.
const EXIT_FAILURE: i32 = 1;
/// Exit status when a one-shot run is given an empty domain.
const EXIT_EMPTY_INPUT: i32 = 2;

/// CLI arguments for whois-lookup
#[derive(Parser, Debug)]
#[command(name = "whois-lookup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up WHOIS registration and contact details for a domain")]
#[command(
    long_about = "Look up WHOIS registration and contact details for a domain.\n\nWith a DOMAIN argument, performs one lookup and exits. Without one, starts an interactive prompt."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain name to look up (omit for the interactive prompt)
    #[arg(value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Which tables to show: domain, contact, or both
    #[arg(short = 'm', long = "mode", value_name = "MODE", help_heading = "Output Format")]
    pub mode: Option<DisplayMode>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Start the interactive prompt (searches DOMAIN first if given)
    #[arg(short = 'i', long = "interactive", help_heading = "Output Format")]
    pub interactive: bool,

    /// API key for the lookup service (or set WL_API_KEY)
    #[arg(long = "api-key", value_name = "KEY", help_heading = "Upstream")]
    pub api_key: Option<String>,

    /// Lookup service endpoint
    #[arg(long = "endpoint", value_name = "URL", help_heading = "Upstream")]
    pub endpoint: Option<String>,

    /// Request timeout, e.g. 10s or 1m
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Upstream")]
    pub timeout: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show debug logging
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Settings resolved from config files, environment, and flags.
#[derive(Debug)]
struct Settings {
    lookup: LookupConfig,
    mode: DisplayMode,
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    };
    process::exit(code);
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_logging(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("whois_lookup={0},whois_lookup_lib={0}", level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<i32, LookupError> {
    let interactive = args.interactive || args.domain.is_none();

    // Empty one-shot input is rejected before anything else is read
    if !interactive && args.domain.as_deref().is_some_and(|d| d.trim().is_empty()) {
        eprintln!("{}", ui::EMPTY_INPUT_NOTICE);
        return Ok(EXIT_EMPTY_INPUT);
    }

    let settings = build_settings(&args)?;
    debug!(?settings, "resolved settings");

    let client = WhoisXmlClient::new(&settings.lookup)?;
    let mut session = LookupSession::with_mode(client, settings.mode);

    if interactive {
        run_interactive(&mut session, args.domain, settings.json).await?;
        Ok(0)
    } else {
        let domain = args.domain.unwrap_or_default();
        Ok(run_once(&mut session, &domain, settings.json).await?)
    }
}

/// Build settings with proper precedence:
/// 1. CLI arguments
/// 2. Environment variables (WL_*)
/// 3. Explicit config file (--config or WL_CONFIG), else discovered files
/// 4. Built-in defaults
fn build_settings(args: &Args) -> Result<Settings, LookupError> {
    let config_manager = ConfigManager::new();
    let env_config = load_env_config();

    let file_config = if let Some(path) = &args.config {
        info!(path = %path, "using config file from --config");
        config_manager.load_file(path)?
    } else if let Some(path) = &env_config.config {
        info!(path = %path, "using config file from WL_CONFIG");
        config_manager.load_file(path)?
    } else {
        config_manager.discover_and_load()?
    };

    let mut lookup = env_config.apply_to(file_config.apply_to(LookupConfig::default()));

    if let Some(key) = &args.api_key {
        lookup = lookup.with_api_key(key.clone());
    }
    if let Some(endpoint) = &args.endpoint {
        lookup = lookup.with_endpoint(endpoint.clone());
    }
    if let Some(timeout) = &args.timeout {
        let secs = parse_timeout_string(timeout).ok_or_else(|| {
            LookupError::config(format!(
                "Invalid --timeout '{}'. Use format like '5s', '30s', '2m' (at most 60m)",
                timeout
            ))
        })?;
        lookup = lookup.with_timeout(Duration::from_secs(secs));
    }

    let mode = args
        .mode
        .or(env_config.mode)
        .or_else(|| file_config.display_mode())
        .unwrap_or_default();
    let json = args.json || env_config.json.or(file_config.json()).unwrap_or(false);

    Ok(Settings { lookup, mode, json })
}

/// Perform one lookup and print it. Returns the process exit status.
async fn run_once(
    session: &mut LookupSession<WhoisXmlClient>,
    domain: &str,
    json: bool,
) -> serde_json::Result<i32> {
    session.set_input(domain);
    let outcome = submit_with_spinner(session).await;

    show_view(session, json)?;

    Ok(match outcome {
        // submit runs to completion here, so this only mirrors Found
        SubmitOutcome::Found | SubmitOutcome::Superseded => 0,
        SubmitOutcome::Failed => EXIT_FAILURE,
        SubmitOutcome::EmptyInput => EXIT_EMPTY_INPUT,
    })
}

/// Run the interactive prompt until `:quit` or end of input.
async fn run_interactive(
    session: &mut LookupSession<WhoisXmlClient>,
    initial: Option<String>,
    json: bool,
) -> Result<(), LookupError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    ui::print_header(session.state().mode);

    if let Some(domain) = initial {
        if !search(session, domain, &mut lines, json).await? {
            return Ok(());
        }
    }

    loop {
        print_prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{}\n", prompt::HELP),
            Command::Invalid(message) => eprintln!("{}", message),
            Command::Mode(mode) => {
                session.set_mode(mode);
                if !json {
                    ui::print_mode_selector(mode);
                    println!();
                }
                show_view(session, json)?;
            }
            Command::Search(text) => {
                if !search(session, text, &mut lines, json).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Submit `text` from the prompt. Returns `false` if input ended while the
/// notice was waiting to be dismissed.
async fn search<R>(
    session: &mut LookupSession<WhoisXmlClient>,
    text: String,
    lines: &mut tokio::io::Lines<R>,
    json: bool,
) -> Result<bool, LookupError>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    session.set_input(text);

    if submit_with_spinner(session).await == SubmitOutcome::EmptyInput {
        ui::print_notice();
        // Only an explicit Enter (or end of input) closes the notice
        let dismissed = lines.next_line().await?.is_some();
        session.close_modal();
        println!();
        return Ok(dismissed);
    }

    show_view(session, json)?;
    Ok(true)
}

/// Print the session's current view, as JSON or as tables.
fn show_view(session: &LookupSession<WhoisXmlClient>, json: bool) -> serde_json::Result<()> {
    let view = session.view();
    if json {
        ui::print_json(session.state().input.trim(), session.state().mode, &view)
    } else {
        ui::print_view(&view);
        Ok(())
    }
}

async fn submit_with_spinner(session: &mut LookupSession<WhoisXmlClient>) -> SubmitOutcome {
    if session.state().input.trim().is_empty() {
        return session.submit().await;
    }

    let spinner = ui::Spinner::start(format!("Looking up {}...", session.state().input.trim()));
    let outcome = session.submit().await;
    spinner.stop().await;
    outcome
}

fn print_prompt() {
    use std::io::Write;

    print!("{} ", console::style("whois>").green().bold());
    let _ = std::io::stdout().flush();
}
