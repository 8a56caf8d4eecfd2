//! Price readouts for consumables.
//!
//! Combined prices are only shown when every ingredient has a known price;
//! otherwise the worst ingredient state decides the message.

use super::{PriceState, PriceTable};
use crate::material::{Consumable, Material};

/// Full consumable set (essence, grail and armor) ingredients and fee.
const FULL_CONSET: [(Material, f32); 4] = [
    (Material::IronIngot, 10.0),
    (Material::PileOfGlitteringDust, 10.0),
    (Material::Bone, 5.0),
    (Material::Feather, 5.0),
];
const FULL_CONSET_FEE: u32 = 750;

/// Outcome of combining several material prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceEstimate {
    /// At least one ingredient is not sold by the trader.
    Unavailable,
    /// At least one ingredient was never price-checked.
    Unknown,
    /// A price check request is outstanding.
    RequestSent,
    /// A price check is queued.
    InQueue,
    /// Combined price in thousands of gold.
    Kilo(f64),
}

impl PriceEstimate {
    /// Combine weighted material prices plus a flat fee.
    pub fn combine(states: &[(PriceState, f32)], extra: u32) -> Self {
        let has = |wanted: PriceState| states.iter().any(|(s, _)| *s == wanted);

        if has(PriceState::Unavailable) {
            return Self::Unavailable;
        }
        if has(PriceState::Unknown) {
            return Self::Unknown;
        }
        if has(PriceState::Sent) {
            return Self::RequestSent;
        }
        if has(PriceState::Queued) {
            return Self::InQueue;
        }

        let total: f64 = states
            .iter()
            .filter_map(|(s, factor)| s.known().map(|p| p as f64 * *factor as f64))
            .sum::<f64>()
            + extra as f64;
        Self::Kilo(total / 1000.0)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Kilo(k) => Some(*k),
            _ => None,
        }
    }

    /// Human readable text without the leading label.
    pub fn describe(&self) -> String {
        match self {
            Self::Unavailable => "(Material not available)".to_string(),
            Self::Unknown => "- (pending price check)".to_string(),
            Self::RequestSent => "Computing (request sent, pending reply)".to_string(),
            Self::InQueue => "Computing (in queue, pending)".to_string(),
            Self::Kilo(k) => format!("{} k", format_kilo(*k)),
        }
    }
}

/// Price readout for two materials combined with unit factors and a flat fee.
pub fn format_price(
    prices: &PriceTable,
    first: Material,
    first_units: f32,
    second: Material,
    second_units: f32,
    extra: u32,
) -> String {
    let estimate = PriceEstimate::combine(
        &[
            (prices.get(first), first_units),
            (prices.get(second), second_units),
        ],
        extra,
    );
    format!("Price: {}", estimate.describe())
}

/// Price readout for a single consumable.
pub fn consumable_price(prices: &PriceTable, consumable: Consumable) -> PriceEstimate {
    let recipe = consumable.recipe();
    PriceEstimate::combine(
        &[
            (prices.get(recipe.first), recipe.first_units),
            (prices.get(recipe.second), recipe.second_units),
        ],
        recipe.fee,
    )
}

pub fn format_consumable_price(prices: &PriceTable, consumable: Consumable) -> String {
    format!("Price: {}", consumable_price(prices, consumable).describe())
}

/// Price of one essence, one grail and one armor together.
pub fn full_conset_price(prices: &PriceTable) -> PriceEstimate {
    let states: Vec<(PriceState, f32)> = FULL_CONSET
        .iter()
        .map(|(m, units)| (prices.get(*m), *units))
        .collect();
    PriceEstimate::combine(&states, FULL_CONSET_FEE)
}

pub fn format_full_conset_price(prices: &PriceTable) -> String {
    format!("Full Conset Price: {}", full_conset_price(prices).describe())
}

const SIGNIFICANT_DIGITS: i32 = 6;

/// Format like printf `%g`: six significant digits, trailing zeros removed.
/// Prices never reach the magnitudes where `%g` switches to exponent form.
fn format_kilo(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(pairs: &[(Material, u32)]) -> PriceTable {
        let mut table = PriceTable::new();
        for (m, p) in pairs {
            table.set(*m, *p);
        }
        table
    }

    #[test]
    fn test_combined_price() {
        let table = priced(&[
            (Material::Feather, 1000),
            (Material::PileOfGlitteringDust, 2000),
        ]);
        let text = format_price(
            &table,
            Material::Feather,
            5.0,
            Material::PileOfGlitteringDust,
            5.0,
            250,
        );
        assert_eq!(text, "Price: 15.25 k");
    }

    #[test]
    fn test_unavailable_wins() {
        let mut table = priced(&[(Material::Feather, 1000)]);
        table.set_state(Material::PileOfGlitteringDust, PriceState::Unavailable);
        let text = format_price(
            &table,
            Material::Feather,
            5.0,
            Material::PileOfGlitteringDust,
            5.0,
            250,
        );
        assert!(text.contains("not available"));

        // Unavailable takes precedence over unknown
        table.reset_to_default(Material::Feather);
        let text = format_price(
            &table,
            Material::Feather,
            5.0,
            Material::PileOfGlitteringDust,
            5.0,
            250,
        );
        assert!(text.contains("not available"));
    }

    #[test]
    fn test_unknown_is_pending() {
        let table = priced(&[(Material::IronIngot, 100)]);
        let text = format_price(&table, Material::IronIngot, 5.0, Material::Bone, 5.0, 250);
        assert!(text.contains("pending"));
        assert!(!text.contains(" k"));
    }

    #[test]
    fn test_computing_states() {
        let mut table = PriceTable::new();
        table.set_state(Material::IronIngot, PriceState::Sent);
        table.set_state(Material::Bone, PriceState::Queued);
        assert_eq!(
            consumable_price(&table, Consumable::ArmorOfSalvation),
            PriceEstimate::RequestSent
        );

        table.set(Material::IronIngot, 100);
        assert_eq!(
            consumable_price(&table, Consumable::ArmorOfSalvation),
            PriceEstimate::InQueue
        );
        assert!(format_consumable_price(&table, Consumable::ArmorOfSalvation).contains("pending"));
    }

    #[test]
    fn test_scroll_uses_fractional_units() {
        let table = priced(&[(Material::PlantFiber, 200), (Material::Bone, 100)]);
        let estimate = consumable_price(&table, Consumable::ScrollOfResurrection);
        // 200*2.5 + 100*2.5 + 250 = 1000
        assert_eq!(estimate.value(), Some(1.0));
        assert_eq!(estimate.describe(), "1 k");
    }

    #[test]
    fn test_full_conset_price() {
        let table = priced(&[
            (Material::IronIngot, 100),
            (Material::PileOfGlitteringDust, 200),
            (Material::Bone, 50),
            (Material::Feather, 150),
        ]);
        // 1000 + 2000 + 250 + 750 + 750 = 4750
        assert_eq!(full_conset_price(&table), PriceEstimate::Kilo(4.75));
        assert_eq!(format_full_conset_price(&table), "Full Conset Price: 4.75 k");
    }

    #[test]
    fn test_full_conset_missing_ingredient() {
        let table = priced(&[(Material::IronIngot, 100)]);
        assert_eq!(full_conset_price(&table), PriceEstimate::Unknown);
    }

    #[test]
    fn test_format_kilo() {
        assert_eq!(format_kilo(15.25), "15.25");
        assert_eq!(format_kilo(12.0), "12");
        assert_eq!(format_kilo(0.0), "0");
        assert_eq!(format_kilo(0.1234), "0.1234");
        assert_eq!(format_kilo(1234.5678), "1234.57");
        assert_eq!(format_kilo(99999.75), "99999.8");
    }
}
