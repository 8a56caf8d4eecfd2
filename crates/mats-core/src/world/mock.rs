//! Mock game client for testing
//!
//! Provides a configurable `WorldView + TradeGateway` implementation that
//! serves a fixed world and records every outbound request instead of
//! talking to a live client.

use std::collections::{BTreeMap, HashMap};

use crate::material::Material;
use crate::trade::{QuoteRequest, TradeGateway, TradeRequest};
use crate::world::{Item, ItemId, WorldView};

/// Mock game client
///
/// Requests are only recorded. Replies must be delivered to the trader by
/// the test itself.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    merchant: Vec<ItemId>,
    items: HashMap<ItemId, Item>,
    bags: BTreeMap<u32, Vec<Item>>,
    gold: u32,
    quotes: Vec<QuoteRequest>,
    trades: Vec<TradeRequest>,
    withdrawals: u32,
    deposits: u32,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_gold(&mut self, gold: u32) {
        self.gold = gold;
    }

    /// Add an item to the merchant window
    pub fn add_merchant_item(&mut self, id: ItemId, material: Material) {
        let item = Item::new(id, material.model_id(), material.tier().trade_unit());
        self.items.insert(id, item);
        self.merchant.push(id);
    }

    /// Close the merchant window
    pub fn clear_merchant(&mut self) {
        self.merchant.clear();
    }

    /// Quote requests sent so far
    pub fn quotes(&self) -> &[QuoteRequest] {
        &self.quotes
    }

    /// Trade requests sent so far
    pub fn trades(&self) -> &[TradeRequest] {
        &self.trades
    }

    pub fn last_quote(&self) -> Option<&QuoteRequest> {
        self.quotes.last()
    }

    pub fn last_trade(&self) -> Option<&TradeRequest> {
        self.trades.last()
    }

    pub fn withdrawals(&self) -> u32 {
        self.withdrawals
    }

    pub fn deposits(&self) -> u32 {
        self.deposits
    }

    /// Forget recorded requests
    pub fn clear_requests(&mut self) {
        self.quotes.clear();
        self.trades.clear();
        self.withdrawals = 0;
        self.deposits = 0;
    }
}

impl WorldView for MockClient {
    fn merchant_items(&self) -> Vec<ItemId> {
        self.merchant.clone()
    }

    fn item(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).copied()
    }

    fn bag_items(&self, bag: u32) -> Option<Vec<Item>> {
        self.bags.get(&bag).cloned()
    }

    fn gold_on_character(&self) -> u32 {
        self.gold
    }
}

impl TradeGateway for MockClient {
    fn request_quote(&mut self, request: QuoteRequest) {
        self.quotes.push(request);
    }

    fn transact_items(&mut self, request: TradeRequest) {
        self.trades.push(request);
    }

    fn withdraw_gold(&mut self) {
        self.withdrawals += 1;
    }

    fn deposit_gold(&mut self) {
        self.deposits += 1;
    }
}

/// Builder for mock clients
///
/// Provides a fluent API for constructing a world for testing.
#[derive(Debug, Clone, Default)]
pub struct MockClientBuilder {
    client: MockClient,
}

impl MockClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gold carried by the character
    pub fn gold(mut self, gold: u32) -> Self {
        self.client.gold = gold;
        self
    }

    /// Add an item to the merchant window
    pub fn merchant_item(mut self, id: ItemId, material: Material) -> Self {
        self.client.add_merchant_item(id, material);
        self
    }

    /// Add a stack to a carried bag (bag ids 1..=4 are searched)
    pub fn bag_item(mut self, bag: u32, id: ItemId, material: Material, quantity: u32) -> Self {
        let item = Item::new(id, material.model_id(), quantity);
        self.client.items.insert(id, item);
        self.client.bags.entry(bag).or_default().push(item);
        self
    }

    /// Add an empty bag
    pub fn empty_bag(mut self, bag: u32) -> Self {
        self.client.bags.entry(bag).or_default();
        self
    }

    pub fn build(self) -> MockClient {
        self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_world() {
        let client = MockClientBuilder::new()
            .gold(500)
            .merchant_item(ItemId(1), Material::Feather)
            .bag_item(1, ItemId(2), Material::Bone, 20)
            .empty_bag(2)
            .build();

        assert_eq!(client.gold_on_character(), 500);
        assert_eq!(client.merchant_items(), vec![ItemId(1)]);
        assert_eq!(client.item(ItemId(2)).unwrap().quantity, 20);
        assert_eq!(client.bag_items(2), Some(Vec::new()));
        assert_eq!(client.bag_items(3), None);
    }

    #[test]
    fn test_records_requests() {
        let mut client = MockClient::new();
        client.request_quote(QuoteRequest::buy(ItemId(1)));
        client.transact_items(TradeRequest::buy(ItemId(1), 10));
        client.withdraw_gold();
        client.deposit_gold();

        assert_eq!(client.quotes().len(), 1);
        assert_eq!(client.last_trade().unwrap().price(), 10);
        assert_eq!(client.withdrawals(), 1);
        assert_eq!(client.deposits(), 1);

        client.clear_requests();
        assert!(client.quotes().is_empty());
        assert_eq!(client.withdrawals(), 0);
    }
}
