//! Material catalogue and consumable recipes.

mod enums;
mod recipe;

pub use enums::{COMMON_MATERIALS, Material, MaterialTier, RARE_MATERIALS};
pub use recipe::{Consumable, Recipe};
