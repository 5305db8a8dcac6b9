//! Calculator entry point — CLI wiring and config-driven server startup.

use std::net::SocketAddr;
use std::path::Path;
use std::process;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wattbill::config::AppConfig;
use wattbill::web::{self, AppState};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    bind_override: Option<String>,
    port_override: Option<u16>,
}

fn print_help() {
    eprintln!("wattbill — electricity power & charge calculator");
    eprintln!();
    eprintln!("Usage: wattbill [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>   Load configuration from TOML file");
    eprintln!("  --bind <ip>       Override server bind address");
    eprintln!("  --port <u16>      Override server port (default: 3000)");
    eprintln!("  --help            Show this help message");
    eprintln!();
    eprintln!("If no --config is given, the built-in defaults are used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        bind_override: None,
        port_override: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--bind" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --bind requires an IP address argument");
                    process::exit(1);
                }
                cli.bind_override = Some(args[i].clone());
            }
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port_override = Some(p);
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = parse_args();

    let mut config = if let Some(ref path) = cli.config_path {
        match AppConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    if let Some(bind) = cli.bind_override {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port_override {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Validated above, so the parse cannot fail.
    let Ok(ip) = config.server.bind.parse() else {
        process::exit(1);
    };
    let addr = SocketAddr::new(ip, config.server.port);

    tracing::info!(
        hours = config.billing.hours,
        "starting calculator on {addr}"
    );

    let state = Arc::new(AppState { config });
    web::serve(state, addr).await;
}
