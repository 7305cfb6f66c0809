//! Newfor subtitle injector: entry point.
//!
//! Connects to a Newfor subtitle receiver and lets an operator push test
//! subtitles to a teletext page from the keyboard.
//!
//! # Usage
//!
//! ```text
//! newfor-injector [OPTIONS]
//!
//! Options:
//!   --host <HOST>          Receiver hostname or IP
//!   --port <PORT>          Receiver TCP port
//!   --page <PAGE>          Teletext page, 000-899
//!   --protocol <VARIANT>   newfor | burst | ascii
//!   --config <PATH>        Config file (default: platform config dir)
//!   --write-timeout-ms <MS>
//!   --no-prompt            Use config defaults instead of asking
//!   --save-config          Write the resolved settings back to the config file
//! ```
//!
//! # Where settings come from
//!
//! Command-line flags win, then the environment (`NEWFOR_HOST`,
//! `NEWFOR_PORT`, `NEWFOR_PAGE`, `NEWFOR_PROTOCOL`).  Host, port and page that
//! are still missing are asked for on stdin, offering the config file value
//! (or `127.0.0.1`, `1234`, `888`) as the default.
//!
//! # Input
//!
//! Commands are single keys (see the dashboard) typed on a line and confirmed
//! with Enter.  Several keys on one line run in order, so `y2` switches to
//! yellow and sends the two-line sample.  End of input quits.
//!
//! Logs go to stderr; stdout carries only the dashboard and command results.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use newfor_core::{PageNumber, ProtocolVariant};
use newfor_injector::application::controls::{dashboard, Command, ControlState};
use newfor_injector::application::session::{Session, SessionError};
use newfor_injector::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig,
};
use newfor_injector::infrastructure::transport::{PacketSink, ReceiverTarget};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Newfor subtitle injector.
///
/// Sends test subtitles to a teletext subtitle receiver over TCP.
#[derive(Debug, Parser)]
#[command(
    name = "newfor-injector",
    about = "Inject test subtitles into a Newfor teletext receiver",
    version
)]
struct Cli {
    /// Hostname or IP address of the receiver.
    #[arg(long, visible_alias = "ip", env = "NEWFOR_HOST")]
    host: Option<String>,

    /// TCP port of the receiver.
    #[arg(long, env = "NEWFOR_PORT")]
    port: Option<u16>,

    /// Teletext page to address, 1-3 digits (000-899).
    #[arg(long, env = "NEWFOR_PAGE")]
    page: Option<String>,

    /// Wire protocol revision spoken by the receiver.
    #[arg(long, env = "NEWFOR_PROTOCOL")]
    protocol: Option<ProtocolVariant>,

    /// Path to the TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-write deadline in milliseconds (0 disables it).
    #[arg(long)]
    write_timeout_ms: Option<u64>,

    /// Do not prompt; take missing values from the config file.
    #[arg(long)]
    no_prompt: bool,

    /// Save the resolved receiver, page and protocol to the config file.
    #[arg(long)]
    save_config: bool,
}

// ── Settings resolution ───────────────────────────────────────────────────────

/// Asks for a value on stdin, returning `default` for an empty answer.
fn prompt(label: &str, default: &str) -> anyhow::Result<String> {
    print!("Enter {label} (default {default}): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read from stdin")?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

/// Merges CLI, environment, prompts and the config file into `config`.
fn resolve(cli: &Cli, config: &mut AppConfig) -> anyhow::Result<()> {
    let ask = !cli.no_prompt;

    config.receiver.host = match &cli.host {
        Some(host) => host.clone(),
        None if ask => prompt("IP address", &config.receiver.host)?,
        None => config.receiver.host.clone(),
    };

    config.receiver.port = match cli.port {
        Some(port) => port,
        None if ask => prompt("port", &config.receiver.port.to_string())?
            .parse()
            .context("port must be a number between 0 and 65535")?,
        None => config.receiver.port,
    };

    let page = match &cli.page {
        Some(page) => page.clone(),
        None if ask => prompt("page", &config.subtitle.page)?,
        None => config.subtitle.page.clone(),
    };
    // Validate now so a typo is caught before connecting.
    page.parse::<PageNumber>()
        .with_context(|| format!("invalid page '{page}'"))?;
    config.subtitle.page = page;

    if let Some(protocol) = cli.protocol {
        config.receiver.protocol = protocol;
    }
    if let Some(ms) = cli.write_timeout_ms {
        config.receiver.write_timeout_ms = Some(ms);
    }
    Ok(())
}

// ── Interactive loop ──────────────────────────────────────────────────────────

/// Whether the command loop should keep going.
enum Flow {
    Continue,
    Quit,
}

/// Opens the session, offering a retry when the receiver cannot be reached.
fn connect_with_retry(
    target: &ReceiverTarget,
    variant: ProtocolVariant,
    no_prompt: bool,
) -> anyhow::Result<Option<Session>> {
    loop {
        match Session::connect(target, variant) {
            Ok(session) => return Ok(Some(session)),
            Err(e) => {
                println!("Error: {e}");
                if no_prompt {
                    return Ok(None);
                }
                let answer = prompt("r to retry, anything else to quit", "quit")?;
                if !answer.eq_ignore_ascii_case("r") {
                    return Ok(None);
                }
            }
        }
    }
}

fn handle<S: PacketSink>(
    cmd: Command,
    session: &mut Session<S>,
    state: &mut ControlState,
    input: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Flow> {
    if state.apply(cmd) {
        println!("{}", state.status_line());
        return Ok(Flow::Continue);
    }

    match cmd {
        Command::Quit => return Ok(Flow::Quit),
        Command::Clear => match session.clear(&state.page) {
            Ok(()) => println!("[CLEAR SENT] page {}", state.page),
            Err(e) => report(&e),
        },
        Command::ChangePage => {
            print!("Enter new page number (current: {}): ", state.page);
            io::stdout().flush()?;
            let Some(line) = input.next() else {
                return Ok(Flow::Quit);
            };
            let line = line.context("failed to read from stdin")?;
            let page = line.trim();
            if page.is_empty() {
                println!("Page unchanged");
            } else {
                match page.parse::<PageNumber>() {
                    Ok(_) => {
                        state.page = page.to_string();
                        info!("page changed to {page}");
                        println!(
                            "{}",
                            dashboard(session.peer(), session.variant_name(), state)
                        );
                    }
                    Err(e) => println!("Page unchanged: {e}"),
                }
            }
        }
        Command::SendSample(_) => {
            let lines = cmd.sample_lines().unwrap_or_default();
            match session.send(&state.page, lines, &state.style) {
                Ok(report) => {
                    println!("[SENT] {} line(s) on rows {:?}", lines.len(), report.rows);
                    for o in &report.overflows {
                        println!("  warning: row {}: {}", o.row, o.overflow);
                    }
                }
                Err(e) => report(&e),
            }
        }
        // Style commands were handled by `apply`.
        Command::SetColor(_)
        | Command::ToggleBox
        | Command::ToggleDoubleHeight
        | Command::SetPosition(_) => {}
    }
    Ok(Flow::Continue)
}

/// Prints a session error for the operator; the session stays usable.
fn report(e: &SessionError) {
    error!("{e}");
    println!("Error: {e}");
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config_file_path().context("no --config given and no platform config dir")?,
    };
    let mut config = load_config_from(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the config file's level.  Logs go to stderr
    // so the dashboard on stdout is not interleaved with them.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    resolve(&cli, &mut config)?;

    if cli.save_config {
        save_config_to(&config, &config_path)
            .with_context(|| format!("failed to save config to {}", config_path.display()))?;
        info!("settings saved to {}", config_path.display());
    }

    let target = ReceiverTarget::new(config.receiver.host.clone(), config.receiver.port)
        .with_write_timeout(config.receiver.write_timeout());
    let variant = config.receiver.protocol;
    info!("Newfor injector starting: target={target}, protocol={variant}");

    let Some(mut session) = connect_with_retry(&target, variant, cli.no_prompt)? else {
        info!("no connection made; exiting");
        return Ok(());
    };

    let mut state = ControlState::new(config.subtitle.page.clone(), config.subtitle.style);
    println!("{}", dashboard(session.peer(), session.variant_name(), &state));

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    'commands: loop {
        print!("\n> ");
        io::stdout().flush()?;
        let Some(line) = input.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        for cmd in Command::parse_line(&line) {
            if let Flow::Quit = handle(cmd, &mut session, &mut state, &mut input)? {
                break 'commands;
            }
        }
    }

    if let Err(e) = session.disconnect() {
        report(&e);
    }
    info!("Newfor injector stopped");
    Ok(())
}
