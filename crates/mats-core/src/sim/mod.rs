//! In-memory game client and scripted sessions for exercising the trader
//! without a live server.

mod merchant;
mod scenario;

pub use merchant::{SimStats, SimulatedMerchant};
pub use scenario::{
    MaterialPrice, Scenario, ScenarioAction, ScenarioListing, ScenarioStack, ScheduledAction,
    SimulationReport,
};
