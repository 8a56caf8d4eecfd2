//! JSON description of a simulated trading session and its runner.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::{SimStats, SimulatedMerchant};
use crate::config::{MaterialsSettings, bags, gold, limits, timing};
use crate::error::{Error, Result};
use crate::material::{Consumable, Material};
use crate::price::{PriceState, PriceTable};
use crate::trade::{
    MaterialsTrader, Progress, TradeSession, TraderEvent, TraderStatus, event_channel,
};

fn default_latency() -> u32 {
    2
}

fn default_bag() -> u32 {
    bags::BACKPACK
}

/// Merchant prices for one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioListing {
    pub material: Material,
    pub buy_price: u32,
    pub sell_price: u32,
}

/// A stack carried by the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStack {
    #[serde(default = "default_bag")]
    pub bag: u32,
    pub material: Material,
    pub quantity: u32,
}

/// User action performed on the trader window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioAction {
    PriceCheck { consumable: Consumable },
    Quote { material: Material },
    BuyConsumable { consumable: Consumable, quantity: u32 },
    Buy { material: Material, quantity: u32 },
    Sell { material: Material, quantity: u32 },
    Cancel,
}

impl ScenarioAction {
    fn quantity(&self) -> Option<u32> {
        match self {
            Self::BuyConsumable { quantity, .. }
            | Self::Buy { quantity, .. }
            | Self::Sell { quantity, .. } => Some(*quantity),
            _ => None,
        }
    }

    fn apply(&self, trader: &mut MaterialsTrader) {
        match *self {
            Self::PriceCheck { consumable } => trader.price_check(consumable),
            Self::Quote { material } => trader.enqueue_quote(material),
            Self::BuyConsumable {
                consumable,
                quantity,
            } => trader.buy_consumable(consumable, quantity),
            Self::Buy { material, quantity } => trader.buy_materials(material, quantity),
            Self::Sell { material, quantity } => trader.sell_materials(material, quantity),
            Self::Cancel => trader.cancel(),
        }
    }
}

/// An action and the frame it is performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduledAction {
    #[serde(default)]
    pub at_frame: u64,
    pub action: ScenarioAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub storage_gold: u32,
    /// Overrides the setting from the settings file when present.
    #[serde(default)]
    pub manage_gold: Option<bool>,
    #[serde(default = "default_latency")]
    pub latency_frames: u32,
    #[serde(default)]
    pub drop_quote_every: Option<u32>,
    #[serde(default)]
    pub merchant: Vec<ScenarioListing>,
    #[serde(default)]
    pub bags: Vec<ScenarioStack>,
    #[serde(default)]
    pub actions: Vec<ScheduledAction>,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for listing in &self.merchant {
            if !seen.insert(listing.material) {
                return Err(Error::InvalidScenario(format!(
                    "{} is listed twice",
                    listing.material
                )));
            }
        }

        for stack in &self.bags {
            if stack.quantity == 0 {
                return Err(Error::InvalidScenario(format!(
                    "empty stack of {} in bag {}",
                    stack.material, stack.bag
                )));
            }
        }

        if let Some(n) = self.drop_quote_every
            && n < 2
        {
            return Err(Error::InvalidScenario(format!(
                "drop_quote_every must be at least 2, got {}",
                n
            )));
        }

        for scheduled in &self.actions {
            if let Some(quantity) = scheduled.action.quantity()
                && !(1..=limits::MAX_QUANTITY).contains(&quantity)
            {
                return Err(Error::InvalidQuantity(i64::from(quantity)));
            }
        }

        if self.gold > gold::CHARACTER_GOLD_CAP {
            return Err(Error::InvalidScenario(format!(
                "character gold {} exceeds the cap",
                self.gold
            )));
        }
        Ok(())
    }

    /// Build the simulated client for this scenario.
    pub fn merchant(&self, events: Sender<TraderEvent>) -> SimulatedMerchant {
        let mut merchant = SimulatedMerchant::new(events);
        merchant.set_gold(self.gold);
        merchant.set_storage_gold(self.storage_gold);
        merchant.set_latency(self.latency_frames);
        merchant.set_drop_quote_every(self.drop_quote_every);
        for listing in &self.merchant {
            merchant.list(listing.material, listing.buy_price, listing.sell_price);
        }
        for stack in &self.bags {
            merchant.carry(stack.bag, stack.material, stack.quantity);
        }
        merchant
    }

    /// Run the scenario until the trader is idle or `max_frames` elapse.
    pub fn run(&self, settings: &MaterialsSettings, max_frames: u64) -> SimulationReport {
        let (tx, rx) = event_channel();
        let mut merchant = self.merchant(tx);
        merchant.open_merchant();

        let mut trader = MaterialsTrader::with_settings(settings);
        if let Some(manage_gold) = self.manage_gold {
            trader.set_manage_gold(manage_gold);
        }
        let mut session = TradeSession::new(trader, merchant, rx);

        let mut actions = self.actions.clone();
        actions.sort_by_key(|a| a.at_frame);
        let mut next_action = 0;
        let mut frames = 0;

        while frames < max_frames {
            while let Some(scheduled) = actions.get(next_action)
                && scheduled.at_frame <= frames
            {
                debug!("Frame {}: {:?}", frames, scheduled.action);
                scheduled.action.apply(session.trader_mut());
                next_action += 1;
            }

            session.client_mut().advance_frame();
            session.pump(timing::FRAME);
            frames += 1;

            let settled = next_action == actions.len()
                && session.trader().is_idle()
                && session.client().pending_replies() == 0;
            if settled {
                break;
            }
        }

        let (trader, merchant) = session.into_parts();
        let report = SimulationReport::new(frames, &trader, &merchant);
        info!(
            "Simulation finished after {} frame(s): {} [{}/{}]",
            report.frames, report.status, report.progress.done, report.progress.total
        );
        report
    }
}

/// Price state of one material at the end of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialPrice {
    pub material: Material,
    pub state: PriceState,
}

/// Outcome of [`Scenario::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub completed: bool,
    pub status: TraderStatus,
    pub progress: Progress,
    pub queued: usize,
    pub gold: u32,
    pub storage_gold: u32,
    pub carried: Vec<(Material, u32)>,
    pub prices: Vec<MaterialPrice>,
    pub stats: SimStats,
    #[serde(skip)]
    pub price_table: PriceTable,
}

impl SimulationReport {
    fn new(frames: u64, trader: &MaterialsTrader, merchant: &SimulatedMerchant) -> Self {
        let prices = Material::iter()
            .map(|material| MaterialPrice {
                material,
                state: trader.price(material),
            })
            .filter(|p| p.state != PriceState::Unknown)
            .collect();
        let carried = Material::iter()
            .map(|m| (m, merchant.carried_quantity(m)))
            .filter(|(_, quantity)| *quantity > 0)
            .collect();

        Self {
            frames,
            completed: trader.is_idle() && !trader.is_cancelled(),
            status: trader.status(),
            progress: trader.progress(),
            queued: trader.queue_len(),
            gold: merchant.gold(),
            storage_gold: merchant.storage_gold(),
            carried,
            prices,
            stats: merchant.stats(),
            price_table: trader.prices().clone(),
        }
    }

    pub fn carried(&self, material: Material) -> u32 {
        self.carried
            .iter()
            .find(|(m, _)| *m == material)
            .map_or(0, |(_, quantity)| *quantity)
    }
}
