//! Simulate command: drive the trader against a scripted merchant.

use std::path::Path;

use anyhow::{Context, Result};
use mats_core::console::{format_material_prices, format_price_board, format_progress_line};
use mats_core::{MaterialsSettings, Scenario};
use tracing::warn;

/// Run a scenario and print the resulting trader state
pub fn run(settings_path: &Path, scenario_path: &Path, max_frames: u64, json: bool) -> Result<()> {
    let settings = match MaterialsSettings::load_or_default(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(
                "Failed to load settings from {}: {}, using defaults",
                settings_path.display(),
                e
            );
            MaterialsSettings::default()
        }
    };

    let scenario = Scenario::load(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;
    let report = scenario.run(&settings, max_frames);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("mats {} - Simulation", env!("CARGO_PKG_VERSION"));
    println!("{}", format_progress_line(report.status, report.progress));
    println!("Frames: {}", report.frames);
    println!(
        "Gold: {} (storage: {})",
        report.gold, report.storage_gold
    );
    println!(
        "Requests: {} quote(s), {} dropped, {} trade(s), {} rejected",
        report.stats.quotes,
        report.stats.dropped_quotes,
        report.stats.trades,
        report.stats.rejected_trades
    );

    if !report.carried.is_empty() {
        println!();
        println!("Carried:");
        for (material, quantity) in &report.carried {
            println!("  {:<28} {}", material.name(), quantity);
        }
    }

    let material_prices = format_material_prices(&report.price_table);
    if !material_prices.is_empty() {
        println!();
        println!("Material prices:");
        println!("{}", material_prices);
    }

    println!();
    println!("Consumables:");
    println!("{}", format_price_board(&report.price_table));

    if !report.completed {
        warn!(
            "Simulation ended with {} transaction(s) still queued",
            report.queued
        );
    }
    Ok(())
}
