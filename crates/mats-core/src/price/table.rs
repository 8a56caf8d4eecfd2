use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::material::Material;

/// Last known trader price of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceState {
    /// Never price-checked.
    #[default]
    Unknown,
    /// A price check is queued but its request has not been sent.
    Queued,
    /// A price check request was sent and the reply is outstanding.
    Sent,
    /// The material is not offered by the current trader.
    Unavailable,
    /// Quoted price in gold.
    Known(u32),
}

impl PriceState {
    pub fn known(&self) -> Option<u32> {
        match self {
            Self::Known(price) => Some(*price),
            _ => None,
        }
    }

    /// Waiting on a price check (queued or sent).
    pub fn is_computing(&self) -> bool {
        matches!(self, Self::Queued | Self::Sent)
    }
}

/// Fixed-size price cache indexed by material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    prices: [PriceState; Material::COUNT],
}

impl PriceTable {
    pub fn new() -> Self {
        Self {
            prices: [PriceState::Unknown; Material::COUNT],
        }
    }

    pub fn get(&self, material: Material) -> PriceState {
        self.prices[material.index()]
    }

    /// Record a quoted price.
    pub fn set(&mut self, material: Material, price: u32) {
        self.prices[material.index()] = PriceState::Known(price);
    }

    pub fn set_state(&mut self, material: Material, state: PriceState) {
        self.prices[material.index()] = state;
    }

    pub fn reset_to_default(&mut self, material: Material) {
        self.prices[material.index()] = PriceState::Unknown;
    }

    pub fn reset_all(&mut self) {
        self.prices = [PriceState::Unknown; Material::COUNT];
    }

    /// Iterate over every material with a known price.
    pub fn known_prices(&self) -> impl Iterator<Item = (Material, u32)> + '_ {
        self.prices.iter().enumerate().filter_map(|(i, state)| {
            let price = state.known()?;
            Material::from_u8(i as u8).map(|m| (m, price))
        })
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new()
    }
}
