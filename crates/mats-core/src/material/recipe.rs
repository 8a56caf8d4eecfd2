use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use super::Material;
use super::enums::normalize_name;
use crate::config::limits;
use crate::error::Error;

/// Two-material crafting recipe with a flat crafting fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recipe {
    pub first: Material,
    /// Units of `first` per crafted item.
    pub first_units: f32,
    pub second: Material,
    /// Units of `second` per crafted item.
    pub second_units: f32,
    /// Flat gold fee paid to the crafter.
    pub fee: u32,
}

/// Consumable crafted from material-trader ingredients.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
pub enum Consumable {
    #[strum(serialize = "Essence of Celerity")]
    EssenceOfCelerity,
    #[strum(serialize = "Grail of Might")]
    GrailOfMight,
    #[strum(serialize = "Armor of Salvation")]
    ArmorOfSalvation,
    #[strum(serialize = "Powerstone of Courage")]
    PowerstoneOfCourage,
    #[strum(serialize = "Scroll of Resurrection")]
    ScrollOfResurrection,
}

impl Consumable {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn recipe(&self) -> Recipe {
        use Material::*;
        let (first, second, units, fee) = match self {
            Self::EssenceOfCelerity => (Feather, PileOfGlitteringDust, 5.0, 250),
            Self::GrailOfMight => (IronIngot, PileOfGlitteringDust, 5.0, 250),
            Self::ArmorOfSalvation => (IronIngot, Bone, 5.0, 250),
            Self::PowerstoneOfCourage => (GraniteSlab, PileOfGlitteringDust, 10.0, 1000),
            Self::ScrollOfResurrection => (PlantFiber, Bone, 2.5, 250),
        };
        Recipe {
            first,
            first_units: units,
            second,
            second_units: units,
            fee,
        }
    }

    /// Ingredients to buy for `quantity` consumables, in enqueue order.
    ///
    /// Purchases alternate between the two ingredients. A scroll of
    /// resurrection takes 2.5 units of each, so scrolls alternate between
    /// two and three purchases per ingredient. The quantity is clamped to
    /// `1..=limits::MAX_QUANTITY`.
    pub fn purchase_plan(&self, quantity: u32) -> Vec<Material> {
        let quantity = quantity.clamp(1, limits::MAX_QUANTITY);
        let recipe = self.recipe();

        let pairs: u32 = match self {
            // 2 + 3 per two scrolls, plus 2 for an odd one out
            Self::ScrollOfResurrection => (quantity / 2)
                .saturating_mul(5)
                .saturating_add(if quantity % 2 == 1 { 2 } else { 0 }),
            _ => (recipe.first_units as u32).saturating_mul(quantity),
        };

        (0..pairs)
            .flat_map(|_| [recipe.first, recipe.second])
            .collect()
    }

    /// Ingredients to price-check before showing this consumable's price.
    pub fn ingredients(&self) -> [Material; 2] {
        let recipe = self.recipe();
        [recipe.first, recipe.second]
    }
}

impl std::fmt::Display for Consumable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Consumable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::iter()
            .find(|c| {
                let name = normalize_name(c.name());
                // "essence" matches "Essence of Celerity"
                name == wanted || (!wanted.is_empty() && name.starts_with(&wanted))
            })
            .ok_or_else(|| Error::UnknownConsumable(s.to_string()))
    }
}
