//! # Ficha CLI
//!
//! Command-line interface for issuing and printing guest vouchers.
//!
//! ## Usage
//!
//! ```bash
//! # Issue a one-day voucher and print it
//! ficha --controller https://unifi.lan:8443 --username admin --password secret \
//!     --printer 192.168.1.50 print --hours 24 --ssid Guest-Net
//!
//! # Same, with connection settings from the environment
//! export FICHA_CONTROLLER_URL=https://unifi.lan:8443 FICHA_USERNAME=admin FICHA_PASSWORD=secret
//! ficha print --hours 2 --note "room 12" --logo logo.png
//!
//! # List vouchers, revoke one, list sites
//! ficha list
//! ficha revoke 65f1c0ffee
//! ficha sites
//! ```

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ficha::{
    Client, FichaError, PrinterConfig,
    controller::{ControllerConfig, ControllerFlavor, DEFAULT_SITE, DEFAULT_TIMEOUT_SECS},
    issue::{IssueRequest, close_after_error, issue_and_print},
    render::logo,
    ticket::{self, TicketLayout},
    transport::{NetworkTransport, PrinterTarget},
};

/// Ficha - Guest Wi-Fi voucher printer
#[derive(Parser, Debug)]
#[command(name = "ficha")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    controller: ControllerArgs,

    /// Printer address, host or host:port (port defaults to 9100)
    #[arg(long, env = "FICHA_PRINTER", global = true)]
    printer: Option<String>,

    /// Paper width profile (80mm or 58mm)
    #[arg(long, default_value = "80mm", value_parser = PrinterConfig::parse, global = true)]
    paper: PrinterConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ControllerArgs {
    /// Controller base URL including port, e.g. https://unifi.lan:8443
    #[arg(long = "controller", env = "FICHA_CONTROLLER_URL", global = true)]
    url: Option<String>,

    #[arg(long, env = "FICHA_USERNAME", global = true)]
    username: Option<String>,

    #[arg(long, env = "FICHA_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[arg(long, env = "FICHA_SITE", default_value = DEFAULT_SITE, global = true)]
    site: String,

    /// Controller runs on UniFi OS (UDM, Cloud Key Gen2+)
    #[arg(long, env = "FICHA_UNIFI_OS", value_parser = BoolishValueParser::new(), global = true)]
    unifi_os: bool,

    /// Verify the controller's TLS certificate
    #[arg(long, env = "FICHA_VERIFY_TLS", value_parser = BoolishValueParser::new(), global = true)]
    verify_tls: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "FICHA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Reuse an existing session cookie instead of logging in (never logged out)
    #[arg(long, env = "FICHA_COOKIE", hide_env_values = true, global = true)]
    cookie: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Issue one voucher and print its ticket
    Print {
        /// Validity once redeemed, in hours
        #[arg(long)]
        hours: u32,

        /// Note stored with the voucher and printed on the ticket
        #[arg(long)]
        note: Option<String>,

        /// Number of allowed uses (0 = unlimited)
        #[arg(long, default_value_t = 1)]
        quota: u32,

        /// Network name printed on the ticket
        #[arg(long)]
        ssid: Option<String>,

        /// Ticket heading
        #[arg(long)]
        title: Option<String>,

        /// PNG/JPEG logo printed at the top
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Pulse the drawer port after cutting
        #[arg(long)]
        pulse: bool,
    },

    /// List vouchers on the site
    List {
        /// Only vouchers from this creation batch (unix seconds)
        #[arg(long)]
        create_time: Option<i64>,
    },

    /// Revoke a voucher by id
    Revoke {
        id: String,
    },

    /// List sites visible to this account
    Sites,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), FichaError> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<(), FichaError> {
    match cli.command {
        Commands::Print {
            hours,
            note,
            quota,
            ssid,
            title,
            logo: logo_path,
            pulse,
        } => {
            let mut request = IssueRequest::new(hours).quota(quota);
            if let Some(note) = note {
                request = request.note(note);
            }
            request.validate()?;

            let mut layout = TicketLayout::new().printer(cli.paper).pulse(pulse);
            if let Some(title) = title {
                layout = layout.title(title);
            }
            if let Some(ssid) = ssid {
                layout = layout.ssid(ssid);
            }
            if let Some(path) = logo_path {
                layout = layout.logo(logo::load(&path, cli.paper.width_dots)?);
            }

            let address = cli
                .printer
                .ok_or_else(|| FichaError::Config("no printer given (--printer or FICHA_PRINTER)".into()))?;
            let target = PrinterTarget::parse(&address)?;

            // Printer first, so an unreachable printer never costs a voucher
            let mut printer = NetworkTransport::open(&target)?;
            let mut client = match connect(&cli.controller).await {
                Ok(client) => client,
                Err(e) => return Err(close_after_error(&mut printer, e)),
            };

            let result = issue_and_print(&mut client, &mut printer, &request, &layout).await;
            let issued = finish(client, result).await?;

            println!(
                "Printed {} (valid for {})",
                ticket::format_code(&issued.ticket.code),
                ticket::duration_label(hours)
            );
        }

        Commands::List { create_time } => {
            let mut client = connect(&cli.controller).await?;
            let result = client.stat_voucher(create_time).await;
            let vouchers = finish(client, result).await?;

            if vouchers.is_empty() {
                println!("No vouchers.");
            }
            for v in vouchers {
                println!(
                    "{:<26} {:<12} {:>6} min  {:>3}/{:<3} {:<17} {}",
                    v.id,
                    ticket::format_code(&v.code),
                    v.duration,
                    v.used,
                    v.quota,
                    format_time(v.create_time),
                    v.note.unwrap_or_default()
                );
            }
        }

        Commands::Revoke { id } => {
            let mut client = connect(&cli.controller).await?;
            let result = client.revoke_voucher(&id).await;
            finish(client, result).await?;
            println!("Revoked {}", id);
        }

        Commands::Sites => {
            let mut client = connect(&cli.controller).await?;
            let result = client.list_sites().await;
            let sites = finish(client, result).await?;

            for site in sites {
                println!("{:<12} {}", site.name, site.desc);
            }
        }
    }

    Ok(())
}

/// Build a client from the CLI options, logging in unless a cookie was given.
async fn connect(args: &ControllerArgs) -> Result<Client, FichaError> {
    let url = args
        .url
        .as_deref()
        .ok_or_else(|| FichaError::Config("no controller URL (--controller or FICHA_CONTROLLER_URL)".into()))?;

    let flavor = if args.unifi_os {
        ControllerFlavor::UnifiOs
    } else {
        ControllerFlavor::Classic
    };

    let config = ControllerConfig::new(
        url,
        args.username.clone().unwrap_or_default(),
        args.password.clone().unwrap_or_default(),
    )
    .site(args.site.clone())
    .flavor(flavor)
    .verify_tls(args.verify_tls)
    .timeout(Duration::from_secs(args.timeout_secs));

    match &args.cookie {
        Some(cookie) => Client::with_cookie(config, cookie.clone()),
        None => {
            let mut client = Client::new(config)?;
            client.login().await?;
            Ok(client)
        }
    }
}

/// Log out (when we own the session), then report the first error.
async fn finish<T>(client: Client, result: Result<T, FichaError>) -> Result<T, FichaError> {
    let closed = client.close().await;
    let value = result?;
    closed?;
    Ok(value)
}

fn format_time(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
