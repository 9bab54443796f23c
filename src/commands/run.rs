//! `cadence run` command.

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::reconcile::{format_reports, run_pass, PassConfig};

/// Execute the `run` command.
///
/// Builds a live context (wrapped for recording when `CADENCE_RECORD` is
/// set) and performs one reconciliation pass.
///
/// # Errors
///
/// Returns an error string if credentials are missing or the pass fails.
pub fn run(config: &Config, dry_run: bool) -> Result<(), String> {
    let credentials = config.credentials().map_err(|e| e.to_string())?;
    let live = ServiceContext::live(credentials, &config.api_url);
    let pass = PassConfig {
        schedule: config.schedule_path.clone(),
        ledger: config.ledger_path.clone(),
        lease_ttl: config.lease_ttl,
        dry_run,
    };

    let Some(dir) = &config.record_dir else {
        return run_with_context(&live, &pass);
    };

    let session = RecordingSession::new(dir)?;
    let ctx = ServiceContext::recording(live, &session);
    let result = run_with_context(&ctx, &pass);

    // Adapters hold the recorder until the context is gone.
    drop(ctx);
    let path = session.finish()?;
    info!(cassette = %path.display(), "recording saved");
    result
}

/// Execute one pass with the given service context and print the report.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or the pass fails.
pub fn run_with_context(ctx: &ServiceContext, pass: &PassConfig) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let reports = runtime.block_on(run_pass(ctx, pass))?;

    if pass.dry_run {
        println!("Dry run, nothing was changed:");
    }
    println!("{}", format_reports(&reports));
    Ok(())
}
