//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

use crate::material::{Consumable, Material};
use crate::price::display::{PriceEstimate, consumable_price, full_conset_price};
use crate::price::{PriceState, PriceTable};
use crate::trade::{Progress, TraderStatus};

const BAR_WIDTH: usize = 24;

/// Format the status line shown next to the trader window's progress bar.
///
/// Looks like `Working [#########...] 3 / 8`.
pub fn format_progress_line(status: TraderStatus, progress: Progress) -> String {
    let filled = ((progress.fraction() * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    );
    format!(
        "{} [{}] {} / {}",
        format_colored_status(status),
        bar.dimmed(),
        progress.done,
        progress.total
    )
}

/// Format every consumable price and the full conset total.
pub fn format_price_board(prices: &PriceTable) -> String {
    let mut output = String::new();
    let width = Consumable::iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);

    for consumable in Consumable::iter() {
        let estimate = consumable_price(prices, consumable);
        let _ = writeln!(
            output,
            "  {:<width$}  Price: {}",
            consumable.name().bold(),
            format_colored_estimate(&estimate),
            width = width
        );
    }
    let _ = write!(
        output,
        "  {:<width$}  {}",
        "Full Conset".bold(),
        format_colored_estimate(&full_conset_price(prices)),
        width = width
    );
    output
}

/// Format every material whose price state is not `Unknown`, one per line.
pub fn format_material_prices(prices: &PriceTable) -> String {
    let lines: Vec<String> = Material::iter()
        .filter_map(|material| {
            let state = prices.get(material);
            let text = match state {
                PriceState::Unknown => return None,
                PriceState::Known(gold) => format!("{}", gold).green().to_string(),
                PriceState::Queued => "in queue".yellow().to_string(),
                PriceState::Sent => "request sent".yellow().to_string(),
                PriceState::Unavailable => "not available".red().to_string(),
            };
            Some(format!("  {:<28} {}", material.name(), text))
        })
        .collect();
    lines.join("\n")
}

fn format_colored_status(status: TraderStatus) -> String {
    match status {
        TraderStatus::Ready => status.green().to_string(),
        TraderStatus::Working => status.yellow().to_string(),
        TraderStatus::Cancelled => status.red().to_string(),
    }
}

fn format_colored_estimate(estimate: &PriceEstimate) -> String {
    let text = estimate.describe();
    match estimate {
        PriceEstimate::Kilo(_) => text.green().to_string(),
        PriceEstimate::Unavailable => text.red().to_string(),
        PriceEstimate::Unknown => text.dimmed().to_string(),
        PriceEstimate::RequestSent | PriceEstimate::InQueue => text.yellow().to_string(),
    }
}
