use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

use crate::error::Error;

/// Crafting material tradable at a material trader.
///
/// The discriminant is used as an index into fixed-size tables, so variants
/// must stay dense and start at zero.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumCount,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Material {
    #[strum(serialize = "Bolt of Cloth")]
    BoltOfCloth = 0,
    #[strum(serialize = "Bone")]
    Bone,
    #[strum(serialize = "Chitin Fragment")]
    ChitinFragment,
    #[strum(serialize = "Feather")]
    Feather,
    #[strum(serialize = "Granite Slab")]
    GraniteSlab,
    #[strum(serialize = "Iron Ingot")]
    IronIngot,
    #[strum(serialize = "Pile of Glittering Dust")]
    PileOfGlitteringDust,
    #[strum(serialize = "Plant Fiber")]
    PlantFiber,
    #[strum(serialize = "Scale")]
    Scale,
    #[strum(serialize = "Tanned Hide Square")]
    TannedHideSquare,
    #[strum(serialize = "Wood Plank")]
    WoodPlank,
    #[strum(serialize = "Amber Chunk")]
    AmberChunk,
    #[strum(serialize = "Bolt of Damask")]
    BoltOfDamask,
    #[strum(serialize = "Bolt of Linen")]
    BoltOfLinen,
    #[strum(serialize = "Bolt of Silk")]
    BoltOfSilk,
    #[strum(serialize = "Deldrimor Steel Ingot")]
    DeldrimorSteelIngot,
    #[strum(serialize = "Diamond")]
    Diamond,
    #[strum(serialize = "Elonian Leather Square")]
    ElonianLeatherSquare,
    #[strum(serialize = "Fur Square")]
    FurSquare,
    #[strum(serialize = "Glob of Ectoplasm")]
    GlobOfEctoplasm,
    #[strum(serialize = "Jadeite Shard")]
    JadeiteShard,
    #[strum(serialize = "Leather Square")]
    LeatherSquare,
    #[strum(serialize = "Lump of Charcoal")]
    LumpOfCharcoal,
    #[strum(serialize = "Monstrous Claw")]
    MonstrousClaw,
    #[strum(serialize = "Monstrous Eye")]
    MonstrousEye,
    #[strum(serialize = "Monstrous Fang")]
    MonstrousFang,
    #[strum(serialize = "Obsidian Shard")]
    ObsidianShard,
    #[strum(serialize = "Onyx Gemstone")]
    OnyxGemstone,
    #[strum(serialize = "Roll of Parchment")]
    RollOfParchment,
    #[strum(serialize = "Roll of Vellum")]
    RollOfVellum,
    #[strum(serialize = "Ruby")]
    Ruby,
    #[strum(serialize = "Sapphire")]
    Sapphire,
    #[strum(serialize = "Spiritwood Plank")]
    SpiritwoodPlank,
    #[strum(serialize = "Steel Ingot")]
    SteelIngot,
    #[strum(serialize = "Tempered Glass Vial")]
    TemperedGlassVial,
    #[strum(serialize = "Vial of Ink")]
    VialOfInk,
}

/// Materials sold by the common material trader, in units of ten.
pub const COMMON_MATERIALS: [Material; 11] = [
    Material::BoltOfCloth,
    Material::Bone,
    Material::ChitinFragment,
    Material::Feather,
    Material::GraniteSlab,
    Material::IronIngot,
    Material::PileOfGlitteringDust,
    Material::PlantFiber,
    Material::Scale,
    Material::TannedHideSquare,
    Material::WoodPlank,
];

/// Materials sold by the rare material trader, one at a time.
pub const RARE_MATERIALS: [Material; 25] = [
    Material::AmberChunk,
    Material::BoltOfDamask,
    Material::BoltOfLinen,
    Material::BoltOfSilk,
    Material::DeldrimorSteelIngot,
    Material::Diamond,
    Material::ElonianLeatherSquare,
    Material::FurSquare,
    Material::GlobOfEctoplasm,
    Material::JadeiteShard,
    Material::LeatherSquare,
    Material::LumpOfCharcoal,
    Material::MonstrousClaw,
    Material::MonstrousEye,
    Material::MonstrousFang,
    Material::ObsidianShard,
    Material::OnyxGemstone,
    Material::RollOfParchment,
    Material::RollOfVellum,
    Material::Ruby,
    Material::Sapphire,
    Material::SpiritwoodPlank,
    Material::SteelIngot,
    Material::TemperedGlassVial,
    Material::VialOfInk,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialTier {
    Common,
    Rare,
}

impl MaterialTier {
    /// Smallest stack the trader accepts in a single sale.
    pub fn min_sell_quantity(&self) -> u32 {
        match self {
            Self::Common => 10,
            Self::Rare => 1,
        }
    }

    /// Units moved by a single trade with the material trader.
    pub fn trade_unit(&self) -> u32 {
        self.min_sell_quantity()
    }
}

impl Material {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Index into fixed-size per-material tables.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn tier(&self) -> MaterialTier {
        if COMMON_MATERIALS.contains(self) {
            MaterialTier::Common
        } else {
            MaterialTier::Rare
        }
    }

    pub fn is_common(&self) -> bool {
        self.tier() == MaterialTier::Common
    }

    /// Game model id of the material item.
    pub fn model_id(&self) -> u32 {
        match self {
            Self::BoltOfCloth => 925,
            Self::Bone => 921,
            Self::ChitinFragment => 954,
            Self::Feather => 933,
            Self::GraniteSlab => 955,
            Self::IronIngot => 948,
            Self::PileOfGlitteringDust => 929,
            Self::PlantFiber => 934,
            Self::Scale => 953,
            Self::TannedHideSquare => 940,
            Self::WoodPlank => 946,
            Self::AmberChunk => 6532,
            Self::BoltOfDamask => 927,
            Self::BoltOfLinen => 926,
            Self::BoltOfSilk => 928,
            Self::DeldrimorSteelIngot => 950,
            Self::Diamond => 935,
            Self::ElonianLeatherSquare => 943,
            Self::FurSquare => 941,
            Self::GlobOfEctoplasm => 930,
            Self::JadeiteShard => 6533,
            Self::LeatherSquare => 942,
            Self::LumpOfCharcoal => 922,
            Self::MonstrousClaw => 923,
            Self::MonstrousEye => 931,
            Self::MonstrousFang => 932,
            Self::ObsidianShard => 945,
            Self::OnyxGemstone => 936,
            Self::RollOfParchment => 951,
            Self::RollOfVellum => 952,
            Self::Ruby => 937,
            Self::Sapphire => 938,
            Self::SpiritwoodPlank => 956,
            Self::SteelIngot => 949,
            Self::TemperedGlassVial => 939,
            Self::VialOfInk => 944,
        }
    }

    pub fn from_model_id(model_id: u32) -> Option<Self> {
        Self::iter().find(|m| m.model_id() == model_id)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Material {
    type Err = Error;

    /// Accepts the display name ("Glob of Ectoplasm") or the variant name
    /// ("GlobOfEctoplasm"), ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::iter()
            .find(|m| normalize_name(m.name()) == wanted || normalize_name(&format!("{:?}", m)) == wanted)
            .ok_or_else(|| Error::UnknownMaterial(s.to_string()))
    }
}

pub(crate) fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
