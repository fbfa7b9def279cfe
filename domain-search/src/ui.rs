//! Pretty-mode display logic for domain-search CLI.
//!
//! This module handles all `--pretty` output: the header, the lookup
//! spinner, and the colored verdict block. Uses only the `console` crate.

use console::{style, Term};
use domain_search_lib::{
    AvailabilityStatus, AvailabilityVerdict, DomainSearchError, ResolverConfig, ValidDomain,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message (e.g. "Looking up example.com...").
    ///
    /// Nothing is drawn when stderr is not a terminal.
    pub fn start(message: String) -> Self {
        let running = Arc::new(AtomicBool::new(true));

        if !Term::stderr().is_term() {
            return Self {
                running,
                handle: None,
            };
        }

        let running_clone = running.clone();
        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(domain: &ValidDomain, config: &ResolverConfig) {
    println!(
        "{} {} {}",
        style("domain-search").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!("- Checking {}", domain)).dim(),
    );
    println!(
        "{}",
        style(format!(
            "RDAP: {} | Timeout: {}s",
            config.endpoint,
            config.timeout.as_secs()
        ))
        .dim()
    );
    println!();
}

// ── Verdict ──────────────────────────────────────────────────────────────────

/// Print the verdict with a colored status badge.
pub fn print_verdict(verdict: &AvailabilityVerdict, verbose: bool) {
    let badge = match verdict.status {
        AvailabilityStatus::Available => style("AVAILABLE").green().bold(),
        AvailabilityStatus::Registered => style("REGISTERED").red().bold(),
        AvailabilityStatus::LookupFailed => style("UNKNOWN").yellow().bold(),
    };

    println!("  {}  {}", style(&verdict.domain).white(), badge);
    println!("  {}", style(verdict.message()).dim());

    if let Some(url) = &verdict.checkout_url {
        println!();
        println!("  {} {}", style("Checkout:").bold(), style(url).cyan().underlined());
    }

    if verbose {
        if let Some(detail) = &verdict.error_message {
            println!("    {} {}", style("└─").dim(), style(detail).dim());
        }
    }
}

/// Print a rejected input in pretty mode.
pub fn print_rejection(err: &DomainSearchError) {
    eprintln!(
        "  {}  {}",
        style("REJECTED").red().bold(),
        style(err.user_message()).dim()
    );
}
