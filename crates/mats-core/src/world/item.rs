use serde::{Deserialize, Serialize};

use crate::material::Material;

/// Server-side identifier of an item instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Item instance as seen in the item array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub model_id: u32,
    pub quantity: u32,
}

impl Item {
    pub fn new(id: ItemId, model_id: u32, quantity: u32) -> Self {
        Self {
            id,
            model_id,
            quantity,
        }
    }

    pub fn is_material(&self, material: Material) -> bool {
        self.model_id == material.model_id()
    }

    pub fn material(&self) -> Option<Material> {
        Material::from_model_id(self.model_id)
    }
}
