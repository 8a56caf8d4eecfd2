use serde::{Deserialize, Serialize};

use crate::world::ItemId;

/// Direction of a trader transaction, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    /// The player buys from the trader.
    TraderBuy,
    /// The player sells to the trader.
    TraderSell,
}

/// Price quote request. The reply is keyed by the quoted item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub direction: TradeDirection,
    /// Items the player offers.
    pub give: Vec<ItemId>,
    /// Items the player asks for.
    pub receive: Vec<ItemId>,
}

impl QuoteRequest {
    pub fn buy(item: ItemId) -> Self {
        Self {
            direction: TradeDirection::TraderBuy,
            give: Vec::new(),
            receive: vec![item],
        }
    }

    pub fn sell(item: ItemId) -> Self {
        Self {
            direction: TradeDirection::TraderSell,
            give: vec![item],
            receive: Vec::new(),
        }
    }

    /// The single item this quote is about.
    pub fn item(&self) -> Option<ItemId> {
        match self.direction {
            TradeDirection::TraderBuy => self.receive.first().copied(),
            TradeDirection::TraderSell => self.give.first().copied(),
        }
    }
}

/// Trade execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub direction: TradeDirection,
    /// Gold paid by the player.
    pub gold_give: u32,
    pub give: Vec<ItemId>,
    /// Gold received by the player.
    pub gold_receive: u32,
    pub receive: Vec<ItemId>,
}

impl TradeRequest {
    /// Pay `price` for one unit of `item`.
    pub fn buy(item: ItemId, price: u32) -> Self {
        Self {
            direction: TradeDirection::TraderBuy,
            gold_give: price,
            give: Vec::new(),
            gold_receive: 0,
            receive: vec![item],
        }
    }

    /// Hand over one unit of `item` for `price`.
    pub fn sell(item: ItemId, price: u32) -> Self {
        Self {
            direction: TradeDirection::TraderSell,
            gold_give: 0,
            give: vec![item],
            gold_receive: price,
            receive: Vec::new(),
        }
    }

    pub fn price(&self) -> u32 {
        match self.direction {
            TradeDirection::TraderBuy => self.gold_give,
            TradeDirection::TraderSell => self.gold_receive,
        }
    }
}

/// Outbound side of the trader protocol.
///
/// Every call is fire-and-forget. Replies arrive later as
/// [`TraderEvent`](super::TraderEvent)s, or never.
pub trait TradeGateway {
    fn request_quote(&mut self, request: QuoteRequest);

    fn transact_items(&mut self, request: TradeRequest);

    /// Move gold from storage to the character.
    fn withdraw_gold(&mut self);

    /// Move gold from the character to storage.
    fn deposit_gold(&mut self);
}
