//! Application entry point for the `fia-agropredictor` terminal client.
//!
//! This binary runs one interactive session against the prediction backend:
//! - Loading configuration from a secrets file, environment variables or `.env`
//! - Initializing structured logging/tracing (to stderr)
//! - Probing the backend for the status badge
//! - Reading operator commands from stdin, one blocking call per command
//! - Redrawing the dashboard from the session after every action
//!
//! # Environment Variables
//! - `API_URL` (optional) – backend base URL (default: `http://127.0.0.1:8000`)
//! - `AGRO_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `AGRO_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config` for the remaining settings.
use std::{env, io::Write};

use anyhow::Result;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use agropredictor::{load_from_env, render, render_json, ApiClient, Command, Dashboard, HELP};

// ---

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = load_from_env()?;
    cfg.log_config();

    let client = ApiClient::new(&cfg)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    let base_url = client.base_url().to_string();
    let mut dashboard = Dashboard::new(client, cfg.simulate_on_disconnect);
    tracing::info!(
        session = %dashboard.session().id(),
        "Session started against {}",
        base_url
    );

    dashboard.refresh_status().await;
    redraw(&dashboard)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Predict(form) => {
                println!("Procesando telemetría...");
                dashboard.submit_manual(form).await;
            }
            Command::Frost => {
                println!("Consultando sensores...");
                dashboard.check_frost().await;
            }
            Command::Status | Command::Show => {}
            Command::Export => {
                render_json(dashboard.session(), &mut std::io::stdout().lock())?;
                continue;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }

        dashboard.refresh_status().await;
        redraw(&dashboard)?;
    }

    tracing::info!(session = %dashboard.session().id(), "Session ended");
    Ok(())
}

fn prompt() -> Result<()> {
    // ---
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

fn redraw(dashboard: &Dashboard) -> Result<()> {
    // ---
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout)?;
    writeln!(stdout, "=== Sistema de Predicción Climática ===")?;
    render(dashboard.session(), &mut stdout)?;
    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Output on stderr, so logs never interleave with the dashboard on stdout
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `AGRO_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by the `AGRO_LOG_LEVEL` env var
///
/// This should be called once at startup before any logging or tracing
/// macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("AGRO_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stderr().is_terminal(),
    };

    // Use RUST_LOG if available, otherwise fall back to AGRO_LOG_LEVEL
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AGRO_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "info",
        };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
