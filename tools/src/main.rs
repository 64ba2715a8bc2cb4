//! panel-runner: headless driver for the DZD Control panel.
//!
//! Usage:
//!   panel-runner --now 2026-10-18T09:00:00Z
//!   panel-runner --backend sqlite --synthetic 50 --seed 7
//!   panel-runner --config panel.json --ipc-mode

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dzdpanel_core::{
    command::PanelCommand,
    config::PanelConfig,
    event::Notification,
    navigation::Route,
    session::{Backend, PanelSession, PanelState, Synthetic},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    View {
        route:    String,
        #[serde(default)]
        criteria: Option<serde_json::Value>,
    },
    Command {
        command: PanelCommand,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct ViewReply {
    route: Route,
    page:  String,
    state: PanelState,
}

#[derive(serde::Serialize)]
struct CommandReply {
    notifications: Vec<Notification>,
    state:         PanelState,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let seed = parse_arg(&args, "--seed", 42u64);
    let synthetic = parse_arg(&args, "--synthetic", 0usize);

    let now: DateTime<Utc> = match flag_value(&args, "--now") {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("--now expects an RFC 3339 timestamp, got {raw:?}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let backend: Backend = flag_value(&args, "--backend")
        .unwrap_or("memory")
        .parse()
        .context("--backend expects memory or sqlite")?;
    let config = match flag_value(&args, "--config") {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };

    let mut session = if synthetic > 0 {
        PanelSession::build_with_synthetic(now, config, backend, Synthetic { seed, count: synthetic })?
    } else {
        PanelSession::build(now, config, backend)?
    };

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        println!("DZD Control: panel-runner");
        println!("  now:       {}", now.to_rfc3339());
        println!("  backend:   {backend:?}");
        if synthetic > 0 {
            println!("  synthetic: {synthetic} (seed {seed})");
        }
        println!();
        print!("{}", session.render_all()?);
    }

    Ok(())
}

fn run_ipc_loop(session: &mut PanelSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Malformed request: {e}");
                write_error(&mut stdout, &e)?;
                continue;
            }
        };

        if matches!(request, IpcRequest::Quit) {
            break;
        }

        // A failed request is reported and the session keeps going.
        match handle_request(session, request) {
            Ok(reply) => writeln!(stdout, "{reply}")?,
            Err(e) => {
                log::error!("Request failed: {e:#}");
                write_error(&mut stdout, &e)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn handle_request(session: &mut PanelSession, request: IpcRequest) -> Result<String> {
    let reply = match request {
        IpcRequest::GetState => serde_json::to_string(&session.state()?)?,
        IpcRequest::View { route, criteria } => {
            let route = Route::resolve(&route)
                .with_context(|| format!("Unknown route: {route}"))?;
            if let Some(criteria) = criteria {
                session.set_criteria_json(route, criteria)?;
            }
            serde_json::to_string(&ViewReply {
                route,
                page: session.page(route)?,
                state: session.state()?,
            })?
        }
        IpcRequest::Command { command } => {
            let notifications = session.apply(command)?;
            serde_json::to_string(&CommandReply {
                notifications,
                state: session.state()?,
            })?
        }
        IpcRequest::Quit => String::new(),
    };
    Ok(reply)
}

fn write_error(out: &mut impl Write, error: &dyn std::fmt::Display) -> Result<()> {
    let err_json = serde_json::json!({ "error": error.to_string() });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
