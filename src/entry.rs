use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::args::LoadArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use crate::http::HttpScenarioClient;
use crate::runner::{RunReport, RunSettings, run_load};
use crate::scenario::{Scenario, ScenarioSettings};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

/// Parses the command line, merges the config file, and runs the load.
///
/// # Errors
///
/// Returns an error for invalid arguments or config, an unusable base URL,
/// or a failed runtime.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;
    let args = resolve_args(args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<(LoadArgs, ArgMatches)> {
    let matches = LoadArgs::command().get_matches();
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn resolve_args(mut args: LoadArgs, matches: &ArgMatches) -> AppResult<LoadArgs> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}

async fn run_async(args: LoadArgs) -> AppResult<()> {
    let client = Arc::new(HttpScenarioClient::new(
        &args.base_url,
        args.request_timeout,
    )?);
    let scenario = Arc::new(Scenario::new(scenario_settings(&args)));

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    info!("Target: {}", client.base_url());
    let started_at = chrono::Utc::now();
    let outcome = run_load(run_settings(&args), scenario, client, &shutdown_tx).await?;
    signal_handle.await?;

    let report = RunReport::new(started_at, &args.base_url, args.vus.get(), &outcome);
    println!("{}", report.render(args.output_format)?);
    Ok(())
}

pub(crate) fn scenario_settings(args: &LoadArgs) -> ScenarioSettings {
    ScenarioSettings {
        password: args.password.clone(),
        transfer_to: args.transfer_to.clone(),
        transfer_amount: args.transfer_amount.get(),
        item: args.item.clone(),
        purchase_amount: args.purchase_amount.get(),
    }
}

pub(crate) const fn run_settings(args: &LoadArgs) -> RunSettings {
    RunSettings {
        vus: args.vus,
        duration: args.duration,
        pace: args.pace,
        iterations: args.iterations,
    }
}
