pub mod config;
pub mod console;
pub mod error;
pub mod material;
pub mod price;
pub mod sim;
pub mod trade;
pub mod world;

pub use config::MaterialsSettings;
pub use error::{Error, Result};
pub use material::{COMMON_MATERIALS, Consumable, Material, MaterialTier, RARE_MATERIALS, Recipe};
pub use price::{PriceEstimate, PriceState, PriceTable};
pub use sim::{Scenario, SimulatedMerchant, SimulationReport};
pub use trade::{
    MaterialsTrader, Progress, TradeGateway, TradeSession, TraderEvent, TraderStatus,
    Transaction, TransactionKind, event_channel,
};
pub use world::{GameClient, Item, ItemId, WorldView};
