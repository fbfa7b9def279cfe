//! Domain Search CLI Application
//!
//! Checks whether one domain is registered using RDAP and prints a checkout
//! link when it is available. A thin front-end over domain-search-lib.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_search_lib::{
    parse_timeout_string, validate_domain, validate_endpoint, AvailabilityResolver,
    AvailabilityStatus, AvailabilityVerdict, CheckResponse, CheckoutLinkConfig, DomainSearchError,
    Settings,
};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Exit code when the domain was checked (available or registered).
const EXIT_CHECKED: i32 = 0;
/// Exit code when the RDAP lookup failed.
const EXIT_LOOKUP_FAILED: i32 = 1;
/// Exit code for invalid input or configuration.
const EXIT_USAGE: i32 = 2;

/// CLI arguments for domain-search
#[derive(Parser, Debug)]
#[command(name = "domain-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check whether a domain is registered using RDAP")]
#[command(
    long_about = "Check whether a domain is registered using RDAP.\n\nA 404 from the RDAP service means the domain is available; when a checkout URL is configured, a link carrying the domain is printed."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain name to check (label.tld, e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Billing checkout URL; `domain=<name>` is appended when available
    #[arg(
        short = 'u',
        long = "checkout-url",
        value_name = "URL",
        help_heading = "Checkout"
    )]
    pub checkout_url: Option<String>,

    /// Output the response envelope as JSON
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Enable colorful, formatted output
    #[arg(
        short = 'p',
        long = "pretty",
        conflicts_with = "json",
        help_heading = "Output Format"
    )]
    pub pretty: bool,

    /// RDAP service root (default: https://rdap.org)
    #[arg(long = "endpoint", value_name = "URL", help_heading = "Lookup")]
    pub endpoint: Option<String>,

    /// Lookup timeout, e.g. 10s or 1m (default: 10s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Lookup")]
    pub timeout: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    let code = match run_domain_search(&args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_USAGE
        }
    };

    process::exit(code);
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "domain_search=debug,domain_search_lib=debug"
    } else {
        "domain_search=warn,domain_search_lib=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Combine config sources with command-line overrides.
///
/// Precedence: flags > environment > config file > defaults.
fn resolve_settings(args: &Args) -> Result<Settings, DomainSearchError> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(endpoint) = &args.endpoint {
        validate_endpoint(endpoint)?;
        settings.resolver.endpoint = endpoint.clone();
    }

    if let Some(timeout_str) = &args.timeout {
        let secs = parse_timeout_string(timeout_str).ok_or_else(|| {
            DomainSearchError::config(format!(
                "Invalid timeout '{}'. Use format like '5s', '10s', '1m' (at most 60m)",
                timeout_str
            ))
        })?;
        settings.resolver.timeout = Duration::from_secs(secs);
    }

    if let Some(checkout_url) = &args.checkout_url {
        settings.checkout = CheckoutLinkConfig::new(checkout_url.clone());
    }

    Ok(settings)
}

/// Main domain checking logic; returns the process exit code.
async fn run_domain_search(args: &Args) -> Result<i32, DomainSearchError> {
    let settings = resolve_settings(args)?;
    tracing::debug!(
        endpoint = %settings.resolver.endpoint,
        timeout = ?settings.resolver.timeout,
        "settings resolved"
    );

    let domain = match validate_domain(&args.domain) {
        Ok(domain) => domain,
        Err(e) => {
            if args.json {
                print_json(&CheckResponse::from_error(&e));
            } else if args.pretty {
                ui::print_rejection(&e);
            } else {
                eprintln!("{}", e.user_message());
            }
            return Ok(EXIT_USAGE);
        }
    };

    let resolver = AvailabilityResolver::with_config(settings.resolver.clone())?;

    let verdict = if args.pretty {
        ui::print_header(&domain, resolver.config());
        let spinner = ui::Spinner::start(format!("Looking up {}...", domain));
        let verdict = resolver.resolve(&domain, &settings.checkout).await;
        spinner.stop().await;
        verdict
    } else {
        resolver.resolve(&domain, &settings.checkout).await
    };

    let code = match verdict.status {
        AvailabilityStatus::LookupFailed => EXIT_LOOKUP_FAILED,
        AvailabilityStatus::Available | AvailabilityStatus::Registered => EXIT_CHECKED,
    };

    if args.json {
        print_json(&CheckResponse::from_verdict(verdict));
    } else if args.pretty {
        ui::print_verdict(&verdict, args.verbose);
    } else {
        print_plain(&verdict);
    }

    Ok(code)
}

fn print_plain(verdict: &AvailabilityVerdict) {
    match verdict.status {
        AvailabilityStatus::LookupFailed => {
            eprintln!("{}", verdict.message());
            if let Some(detail) = &verdict.error_message {
                eprintln!("  ({})", detail);
            }
        }
        _ => {
            println!("{}", verdict.message());
            if let Some(url) = &verdict.checkout_url {
                println!("Checkout: {}", url);
            }
        }
    }
}

fn print_json(response: &CheckResponse) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize response: {}", e),
    }
}
