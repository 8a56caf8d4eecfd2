//! Deterministic stand-in for a live game client.
//!
//! The simulated merchant answers quote and trade requests through the
//! trader event channel after a fixed frame latency, the way the server
//! answers the real client.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::mpsc::Sender;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{bags, gold, stream};
use crate::material::Material;
use crate::trade::{QuoteRequest, TradeDirection, TradeGateway, TradeRequest, TraderEvent};
use crate::world::{Item, ItemId, WorldView};

/// Trader prices for one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Listing {
    item_id: ItemId,
    buy_price: u32,
    sell_price: u32,
}

/// Request counters collected during a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SimStats {
    pub quotes: u32,
    pub dropped_quotes: u32,
    pub trades: u32,
    pub rejected_trades: u32,
    pub withdrawals: u32,
    pub deposits: u32,
}

pub struct SimulatedMerchant {
    events: Sender<TraderEvent>,
    latency_frames: u64,
    drop_quote_every: Option<u32>,
    frame: u64,
    outbox: VecDeque<(u64, TraderEvent)>,
    next_item_id: u32,
    listings: HashMap<Material, Listing>,
    merchant: Vec<ItemId>,
    items: HashMap<ItemId, Item>,
    bags: BTreeMap<u32, Vec<ItemId>>,
    gold: u32,
    storage_gold: u32,
    stats: SimStats,
}

impl SimulatedMerchant {
    pub fn new(events: Sender<TraderEvent>) -> Self {
        Self {
            events,
            latency_frames: 1,
            drop_quote_every: None,
            frame: 0,
            outbox: VecDeque::new(),
            next_item_id: 1,
            listings: HashMap::new(),
            merchant: Vec::new(),
            items: HashMap::new(),
            bags: BTreeMap::new(),
            gold: 0,
            storage_gold: 0,
            stats: SimStats::default(),
        }
    }

    /// Frames between a request and its reply.
    pub fn set_latency(&mut self, frames: u32) {
        self.latency_frames = u64::from(frames);
    }

    /// Silently drop every `n`th quote request.
    pub fn set_drop_quote_every(&mut self, n: Option<u32>) {
        self.drop_quote_every = n.filter(|&n| n > 0);
    }

    pub fn set_gold(&mut self, gold: u32) {
        self.gold = gold;
    }

    pub fn set_storage_gold(&mut self, gold: u32) {
        self.storage_gold = gold;
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn storage_gold(&self) -> u32 {
        self.storage_gold
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replies scheduled but not delivered yet.
    pub fn pending_replies(&self) -> usize {
        self.outbox.len()
    }

    /// Offer a material in the merchant window.
    pub fn list(&mut self, material: Material, buy_price: u32, sell_price: u32) {
        if let Some(listing) = self.listings.get_mut(&material) {
            listing.buy_price = buy_price;
            listing.sell_price = sell_price;
            return;
        }
        let id = self.allocate(material, material.tier().trade_unit());
        self.merchant.push(id);
        self.listings.insert(
            material,
            Listing {
                item_id: id,
                buy_price,
                sell_price,
            },
        );
    }

    /// Put a stack of `material` into `bag`.
    pub fn carry(&mut self, bag: u32, material: Material, quantity: u32) -> ItemId {
        let id = self.allocate(material, quantity);
        self.bags.entry(bag).or_default().push(id);
        id
    }

    /// Units of `material` in carried bags.
    pub fn carried_quantity(&self, material: Material) -> u32 {
        bags::CARRIED
            .filter_map(|bag| self.bags.get(&bag))
            .flatten()
            .filter_map(|id| self.items.get(id))
            .filter(|item| item.is_material(material))
            .map(|item| item.quantity)
            .sum()
    }

    /// Open the merchant window: the server streams both tabs.
    pub fn open_merchant(&mut self) {
        self.schedule_now(TraderEvent::ItemStreamEnd {
            stream: stream::MERCHANT_SELL_TAB,
        });
        self.schedule_now(TraderEvent::ItemStreamEnd {
            stream: stream::MERCHANT_BUY_TAB,
        });
    }

    /// Advance one frame and deliver every reply that is due.
    pub fn advance_frame(&mut self) -> usize {
        self.frame += 1;
        let mut delivered = 0;
        while let Some(&(due, event)) = self.outbox.front() {
            if due > self.frame {
                break;
            }
            self.outbox.pop_front();
            if self.events.send(event).is_err() {
                debug!("Trader event receiver dropped, discarding {:?}", event);
            }
            delivered += 1;
        }
        delivered
    }

    fn allocate(&mut self, material: Material, quantity: u32) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        self.items
            .insert(id, Item::new(id, material.model_id(), quantity));
        id
    }

    fn schedule_now(&mut self, event: TraderEvent) {
        self.schedule(self.frame, event);
    }

    fn schedule_reply(&mut self, event: TraderEvent) {
        self.schedule(self.frame + self.latency_frames, event);
    }

    /// Keep the outbox sorted by due frame, FIFO among equal frames.
    fn schedule(&mut self, due: u64, event: TraderEvent) {
        let at = self.outbox.partition_point(|&(d, _)| d <= due);
        self.outbox.insert(at, (due, event));
    }

    fn listing_for(&self, item_id: ItemId) -> Option<(Material, Listing)> {
        let material = self.items.get(&item_id)?.material()?;
        self.listings.get(&material).map(|l| (material, *l))
    }

    fn in_carried_bag(&self, item_id: ItemId) -> bool {
        bags::CARRIED
            .filter_map(|bag| self.bags.get(&bag))
            .any(|ids| ids.contains(&item_id))
    }

    /// Add bought units to the first carried stack of `material`, or a new backpack stack.
    fn receive_material(&mut self, material: Material, units: u32) {
        let existing = bags::CARRIED
            .filter_map(|bag| self.bags.get(&bag))
            .flatten()
            .copied()
            .find(|id| self.items.get(id).is_some_and(|i| i.is_material(material)));

        match existing.and_then(|id| self.items.get_mut(&id)) {
            Some(item) => item.quantity += units,
            None => {
                self.carry(bags::BACKPACK, material, units);
            }
        }
    }

    fn remove_units(&mut self, item_id: ItemId, units: u32) -> bool {
        let Some(item) = self.items.get_mut(&item_id) else {
            return false;
        };
        if item.quantity < units {
            return false;
        }
        item.quantity -= units;
        if item.quantity == 0 {
            self.items.remove(&item_id);
            for ids in self.bags.values_mut() {
                ids.retain(|id| *id != item_id);
            }
        }
        true
    }
}

impl WorldView for SimulatedMerchant {
    fn merchant_items(&self) -> Vec<ItemId> {
        self.merchant.clone()
    }

    fn item(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).copied()
    }

    fn bag_items(&self, bag: u32) -> Option<Vec<Item>> {
        let ids = self.bags.get(&bag)?;
        Some(ids.iter().filter_map(|id| self.items.get(id)).copied().collect())
    }

    fn gold_on_character(&self) -> u32 {
        self.gold
    }
}

impl TradeGateway for SimulatedMerchant {
    fn request_quote(&mut self, request: QuoteRequest) {
        self.stats.quotes += 1;
        if let Some(n) = self.drop_quote_every
            && self.stats.quotes % n == 0
        {
            debug!("Dropping quote request #{}", self.stats.quotes);
            self.stats.dropped_quotes += 1;
            return;
        }

        let Some(item_id) = request.item() else {
            warn!("Quote request without an item: {:?}", request);
            return;
        };
        let Some((_, listing)) = self.listing_for(item_id) else {
            debug!("Merchant does not trade item {}", item_id);
            return;
        };

        let price = match request.direction {
            TradeDirection::TraderBuy if listing.item_id == item_id => listing.buy_price,
            TradeDirection::TraderSell if self.in_carried_bag(item_id) => listing.sell_price,
            _ => {
                debug!("Item {} cannot be quoted as {:?}", item_id, request.direction);
                return;
            }
        };
        self.schedule_reply(TraderEvent::quote(item_id, price));
    }

    fn transact_items(&mut self, request: TradeRequest) {
        let accepted = match request.direction {
            TradeDirection::TraderBuy => {
                let material = request
                    .receive
                    .first()
                    .and_then(|id| self.listing_for(*id))
                    .map(|(m, _)| m);
                match material {
                    Some(material) if self.gold >= request.gold_give => {
                        self.gold -= request.gold_give;
                        self.receive_material(material, material.tier().trade_unit());
                        true
                    }
                    _ => false,
                }
            }
            TradeDirection::TraderSell => {
                let sold = request.give.first().and_then(|&id| {
                    let material = self.items.get(&id)?.material()?;
                    Some((id, material))
                });
                let fits = u64::from(self.gold) + u64::from(request.gold_receive)
                    <= u64::from(gold::CHARACTER_GOLD_CAP);
                match sold {
                    Some((id, material)) if fits => {
                        let removed = self.remove_units(id, material.tier().trade_unit());
                        if removed {
                            self.gold += request.gold_receive;
                        }
                        removed
                    }
                    _ => false,
                }
            }
        };

        if accepted {
            self.stats.trades += 1;
            self.schedule_reply(TraderEvent::TransactionDone);
        } else {
            warn!("Merchant rejected trade {:?}", request);
            self.stats.rejected_trades += 1;
        }
    }

    fn withdraw_gold(&mut self) {
        let amount = self
            .storage_gold
            .min(gold::CHARACTER_GOLD_CAP.saturating_sub(self.gold));
        self.storage_gold -= amount;
        self.gold += amount;
        self.stats.withdrawals += 1;
        debug!("Withdrew {} gold (character: {})", amount, self.gold);
    }

    fn deposit_gold(&mut self) {
        let amount = self
            .gold
            .min(gold::STORAGE_GOLD_CAP.saturating_sub(self.storage_gold));
        self.gold -= amount;
        self.storage_gold += amount;
        self.stats.deposits += 1;
        debug!("Deposited {} gold (storage: {})", amount, self.storage_gold);
    }
}
