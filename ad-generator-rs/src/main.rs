// ad-generator-rs/src/main.rs
// Command line entry point: parse arguments, load secrets, run the pipeline

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;

use ad_generator::cli::Args;
use ad_generator::{render, Pipeline, TerminalReporter};
use ads_tool_sdk::ConfigProvider;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();

    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if args.list_options {
        print!("{}", render::catalog_listing());
        return Ok(ExitCode::SUCCESS);
    }

    let provider: Arc<dyn ConfigProvider> = Arc::new(args.config_provider()?);
    let params = args.run_params(&*provider)?;

    let pipeline = Pipeline::from_provider(provider).with_policy(args.keyword_failure_policy());
    let reporter = TerminalReporter::new();

    match pipeline.run_and_report(&params, &reporter).await {
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::FAILURE),
    }
}
