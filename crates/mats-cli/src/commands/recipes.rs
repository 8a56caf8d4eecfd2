//! Recipes command: list consumables and what the trader buys for them.

use anyhow::Result;
use mats_core::Consumable;
use strum::IntoEnumIterator;

/// Print every consumable recipe
pub fn run() -> Result<()> {
    for consumable in Consumable::iter() {
        let recipe = consumable.recipe();
        println!("{}", consumable.name());
        println!(
            "  {} x{} + {} x{} + {} gold",
            recipe.first.name(),
            format_units(recipe.first_units),
            recipe.second.name(),
            format_units(recipe.second_units),
            recipe.fee
        );
        println!(
            "  Trader purchases per unit: {}",
            consumable.purchase_plan(1).len()
        );
    }
    Ok(())
}

fn format_units(units: f32) -> String {
    if units.fract() == 0.0 {
        format!("{}", units)
    } else {
        format!("{:.1}", units)
    }
}
