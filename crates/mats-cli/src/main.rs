mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to warn when RUST_LOG is unset
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mats=warn,mats_core=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Simulate {
            scenario,
            max_frames,
            json,
        } => commands::simulate::run(&args.settings, &scenario, max_frames, json),
        Command::Recipes => commands::recipes::run(),
        Command::Settings {
            manage_gold,
            show_menubutton,
        } => commands::settings::run(&args.settings, manage_gold, show_menubutton),
    }
}
