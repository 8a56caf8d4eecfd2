//! CLI argument definitions for mats.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mats")]
#[command(about = "Material trader automation and price checker", version)]
pub struct Args {
    /// Path to the settings file holding the [Materials] section
    #[arg(long, value_name = "FILE", default_value = "materials.ini", env = "MATS_SETTINGS")]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a scripted trading session against a simulated merchant
    Simulate {
        /// Scenario file (JSON)
        scenario: PathBuf,
        /// Stop after this many frames even if transactions remain
        #[arg(long, default_value = "10000")]
        max_frames: u64,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List consumable recipes and their ingredients
    Recipes,
    /// Show or change the persisted settings
    Settings {
        /// Withdraw or deposit gold automatically when a trade needs it
        #[arg(long)]
        manage_gold: Option<bool>,
        /// Show the trader window button in the main menu
        #[arg(long)]
        show_menubutton: Option<bool>,
    },
}
