//! Material trader state machine.
//!
//! Drives one queued transaction at a time through
//! `quote requested -> quote received -> trade requested -> trade done`.
//!
//! ## Flow
//!
//! - [`MaterialsTrader::tick`] runs once per frame. When nothing is in
//!   flight (or the retry cooldown of the outstanding request has passed)
//!   it resolves the head transaction to an item instance and requests a
//!   quote for it. Unresolvable transactions are dropped as done.
//! - [`MaterialsTrader::on_quoted_price`] records the price and, for buys
//!   and sells, issues the trade if the gold limits allow it.
//! - [`MaterialsTrader::on_transaction_done`] advances the queue.
//!
//! Replies carry no correlation beyond the item id, so anything that does
//! not match the head transaction is dropped. A request whose reply never
//! arrives is re-issued every cooldown window, never abandoned.

use std::time::Duration;

use serde::Serialize;
use strum::IntoStaticStr;
use tracing::{debug, info, warn};

use super::{
    Progress, QuoteRequest, TradeRequest, TraderEvent, Transaction, TransactionKind,
    TransactionQueue,
};
use crate::config::{MaterialsSettings, gold, limits, stream, timing};
use crate::material::{Consumable, Material};
use crate::price::{PriceState, PriceTable};
use crate::world::{GameClient, ItemId, WorldView, find_bag_item, find_merchant_item};

/// Status shown next to the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
pub enum TraderStatus {
    Ready,
    Working,
    Cancelled,
}

impl std::fmt::Display for TraderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Outstanding request of the head transaction.
///
/// At most one request is outstanding at a time. `retry_at` is measured on
/// the trader's frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    Quote { retry_at: Duration },
    Trade { retry_at: Duration },
}

impl Pending {
    fn retry_at(&self) -> Option<Duration> {
        match self {
            Self::Idle => None,
            Self::Quote { retry_at } | Self::Trade { retry_at } => Some(*retry_at),
        }
    }
}

pub struct MaterialsTrader {
    prices: PriceTable,
    queue: TransactionQueue,
    /// Merchant item ids from the last "buy" tab stream.
    merchant_stock: Vec<ItemId>,
    pending: Pending,
    cancelled: bool,
    manage_gold: bool,
    /// Sum of all tick deltas.
    clock: Duration,
}

impl MaterialsTrader {
    pub fn new() -> Self {
        Self {
            prices: PriceTable::new(),
            queue: TransactionQueue::new(),
            merchant_stock: Vec::new(),
            pending: Pending::Idle,
            cancelled: false,
            manage_gold: false,
            clock: Duration::ZERO,
        }
    }

    pub fn with_settings(settings: &MaterialsSettings) -> Self {
        let mut trader = Self::new();
        trader.manage_gold = settings.manage_gold;
        trader
    }

    pub fn manage_gold(&self) -> bool {
        self.manage_gold
    }

    pub fn set_manage_gold(&mut self, manage_gold: bool) {
        self.manage_gold = manage_gold;
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn price(&self, material: Material) -> PriceState {
        self.prices.get(material)
    }

    pub fn progress(&self) -> Progress {
        self.queue.progress()
    }

    pub fn status(&self) -> TraderStatus {
        if self.cancelled {
            TraderStatus::Cancelled
        } else if self.queue.progress().remaining() > 0 {
            TraderStatus::Working
        } else {
            TraderStatus::Ready
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn quote_pending(&self) -> bool {
        matches!(self.pending, Pending::Quote { .. })
    }

    pub fn trade_pending(&self) -> bool {
        matches!(self.pending, Pending::Trade { .. })
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued transactions, head first.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.queue.iter()
    }

    pub fn merchant_stock(&self) -> &[ItemId] {
        &self.merchant_stock
    }

    /// Time accumulated from tick deltas.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Append a transaction to the queue.
    ///
    /// Enqueuing onto an empty queue restarts the progress counters, and any
    /// enqueue lifts a previous cancellation.
    pub fn enqueue(&mut self, kind: TransactionKind, material: Material) {
        if self.queue.push(kind, material) {
            debug!("Starting new transaction batch with {} {}", kind, material);
        }
        if kind == TransactionKind::Quote {
            self.prices.set_state(material, PriceState::Queued);
        }
        self.cancelled = false;
    }

    pub fn enqueue_quote(&mut self, material: Material) {
        self.enqueue(TransactionKind::Quote, material);
    }

    pub fn enqueue_purchase(&mut self, material: Material) {
        self.enqueue(TransactionKind::Buy, material);
    }

    pub fn enqueue_sell(&mut self, material: Material) {
        self.enqueue(TransactionKind::Sell, material);
    }

    /// Price-check both ingredients of a consumable.
    pub fn price_check(&mut self, consumable: Consumable) {
        for material in consumable.ingredients() {
            self.enqueue_quote(material);
        }
    }

    /// Buy the ingredients of `quantity` consumables.
    pub fn buy_consumable(&mut self, consumable: Consumable, quantity: u32) {
        for material in consumable.purchase_plan(quantity) {
            self.enqueue_purchase(material);
        }
    }

    /// Buy `quantity` trade units of a material, clamped to `1..=MAX_QUANTITY`.
    pub fn buy_materials(&mut self, material: Material, quantity: u32) {
        for _ in 0..clamp_quantity(quantity) {
            self.enqueue_purchase(material);
        }
    }

    /// Sell `quantity` trade units of a material, clamped to `1..=MAX_QUANTITY`.
    pub fn sell_materials(&mut self, material: Material, quantity: u32) {
        for _ in 0..clamp_quantity(quantity) {
            self.enqueue_sell(material);
        }
    }

    /// Drop every queued transaction and stop until the next enqueue.
    ///
    /// Requests already sent are not retracted; their replies are dropped
    /// when they arrive.
    pub fn cancel(&mut self) {
        for trans in self.queue.iter() {
            if trans.kind == TransactionKind::Quote
                && self.prices.get(trans.material).is_computing()
            {
                self.prices.reset_to_default(trans.material);
            }
        }

        if !self.queue.is_empty() {
            info!("Cancelling {} queued transaction(s)", self.queue.len());
        }
        self.cancelled = true;
        self.pending = Pending::Idle;
        self.queue.clear();
    }

    /// Advance the frame clock and issue the next quote request if due.
    pub fn tick<C: GameClient + ?Sized>(&mut self, delta: Duration, client: &mut C) {
        self.clock += delta;

        if self.cancelled {
            return;
        }
        if let Some(retry_at) = self.pending.retry_at()
            && self.clock < retry_at
        {
            return;
        }
        let Some(head) = self.queue.front().copied() else {
            return;
        };

        let item = if head.uses_merchant_stock() {
            find_merchant_item(&self.merchant_stock, head.material, &*client)
        } else {
            find_bag_item(head.material, &*client)
        };

        let Some(item) = item else {
            debug!("No tradable item for {}, skipping", head);
            if head.kind == TransactionKind::Quote {
                self.prices.set_state(head.material, PriceState::Unavailable);
            }
            self.dequeue();
            return;
        };

        if self.pending != Pending::Idle {
            debug!("No reply for {} within cooldown, re-quoting", head);
        }

        let request = match head.kind {
            TransactionKind::Quote | TransactionKind::Buy => QuoteRequest::buy(item.id),
            TransactionKind::Sell => QuoteRequest::sell(item.id),
        };
        debug!("Requesting quote for {} (item {})", head, item.id);
        client.request_quote(request);

        if let Some(trans) = self.queue.front_mut() {
            trans.item_id = Some(item.id);
        }
        if head.kind == TransactionKind::Quote {
            self.prices.set_state(head.material, PriceState::Sent);
        }
        self.pending = Pending::Quote {
            retry_at: self.clock + timing::RETRY_COOLDOWN,
        };
    }

    /// Dispatch a server reply to its handler.
    pub fn handle_event<C: GameClient + ?Sized>(&mut self, event: TraderEvent, client: &mut C) {
        match event {
            TraderEvent::QuotedItemPrice { item_id, price } => {
                self.on_quoted_price(item_id, price, client)
            }
            TraderEvent::TransactionDone => self.on_transaction_done(),
            TraderEvent::ItemStreamEnd { stream } => self.on_item_stream_end(stream, &*client),
        }
    }

    /// Handle a price quote reply.
    pub fn on_quoted_price<C: GameClient + ?Sized>(
        &mut self,
        item_id: ItemId,
        price: u32,
        client: &mut C,
    ) {
        let Some(head) = self.queue.front().copied() else {
            return;
        };
        if self.cancelled || head.item_id != Some(item_id) {
            debug!(
                "Dropping quote for item {} ({} gold): not the head transaction",
                item_id, price
            );
            self.clear_quote_pending();
            return;
        }

        debug!("Quoted {} gold for {}", price, head);
        self.prices.set(head.material, price);

        match head.kind {
            TransactionKind::Quote => self.dequeue(),
            TransactionKind::Buy => {
                let gold_on_character = client.gold_on_character();
                if gold_on_character >= price {
                    client.transact_items(TradeRequest::buy(item_id, price));
                    self.arm_trade();
                } else if self.manage_gold {
                    info!(
                        "Not enough gold for {} ({} < {}), withdrawing from storage",
                        head, gold_on_character, price
                    );
                    client.withdraw_gold();
                } else {
                    warn!(
                        "Not enough gold for {} ({} < {}), cancelling",
                        head, gold_on_character, price
                    );
                    self.cancel();
                }
            }
            TransactionKind::Sell => {
                let gold_on_character = client.gold_on_character();
                let after_sale = u64::from(gold_on_character) + u64::from(price);
                if after_sale <= u64::from(gold::CHARACTER_GOLD_CAP) {
                    client.transact_items(TradeRequest::sell(item_id, price));
                    self.arm_trade();
                } else if self.manage_gold {
                    info!(
                        "Selling {} would exceed the gold cap ({}), depositing to storage",
                        head, after_sale
                    );
                    client.deposit_gold();
                } else {
                    warn!(
                        "Selling {} would exceed the gold cap ({}), cancelling",
                        head, after_sale
                    );
                    self.cancel();
                }
            }
        }

        self.clear_quote_pending();
    }

    /// Handle a trade completion. Ignored when nothing is queued.
    pub fn on_transaction_done(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if self.trade_pending() {
            self.pending = Pending::Idle;
        }
        self.dequeue();
    }

    /// Handle the end of an item stream; only the merchant "buy" tab refreshes the stock.
    pub fn on_item_stream_end<W: WorldView + ?Sized>(&mut self, stream_id: u32, world: &W) {
        if stream_id != stream::MERCHANT_BUY_TAB {
            return;
        }
        self.merchant_stock = world.merchant_items();
        info!(
            "Merchant stock refreshed: {} item(s)",
            self.merchant_stock.len()
        );
    }

    fn arm_trade(&mut self) {
        self.pending = Pending::Trade {
            retry_at: self.clock + timing::RETRY_COOLDOWN,
        };
    }

    fn clear_quote_pending(&mut self) {
        if self.quote_pending() {
            self.pending = Pending::Idle;
        }
    }

    /// Pop the head. A quote leaving the queue without a price goes back to `Unknown`.
    fn dequeue(&mut self) {
        if let Some(trans) = self.queue.pop() {
            let quoted_again = self
                .queue
                .iter()
                .any(|t| t.kind == TransactionKind::Quote && t.material == trans.material);
            if trans.kind == TransactionKind::Quote
                && !quoted_again
                && self.prices.get(trans.material).is_computing()
            {
                self.prices.reset_to_default(trans.material);
            }
            let progress = self.queue.progress();
            debug!("Finished {} [{}/{}]", trans, progress.done, progress.total);
        }
    }
}

fn clamp_quantity(quantity: u32) -> u32 {
    if quantity > limits::MAX_QUANTITY {
        warn!(
            "Quantity {} exceeds the limit, enqueuing {}",
            quantity,
            limits::MAX_QUANTITY
        );
    }
    quantity.clamp(1, limits::MAX_QUANTITY)
}

impl Default for MaterialsTrader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{MockClient, MockClientBuilder};

    const FRAME: Duration = Duration::from_millis(16);

    fn trader_with_stock(client: &MockClient) -> MaterialsTrader {
        let mut trader = MaterialsTrader::new();
        trader.on_item_stream_end(stream::MERCHANT_BUY_TAB, client);
        trader
    }

    fn merchant() -> MockClient {
        MockClientBuilder::new()
            .gold(5000)
            .merchant_item(ItemId(100), Material::Feather)
            .merchant_item(ItemId(101), Material::PileOfGlitteringDust)
            .merchant_item(ItemId(102), Material::Diamond)
            .build()
    }

    #[test]
    fn test_enqueue_restarts_counters_and_lifts_cancel() {
        let mut trader = MaterialsTrader::new();
        trader.enqueue_purchase(Material::Feather);
        trader.cancel();
        assert_eq!(trader.status(), TraderStatus::Cancelled);

        trader.enqueue_purchase(Material::Bone);
        assert!(!trader.is_cancelled());
        assert_eq!(trader.progress(), Progress { done: 0, total: 1 });
        assert_eq!(trader.status(), TraderStatus::Working);
    }

    #[test]
    fn test_tick_requests_quote_and_arms_pending() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Feather);

        trader.tick(FRAME, &mut client);

        assert!(trader.quote_pending());
        assert!(!trader.trade_pending());
        assert_eq!(client.quotes(), &[QuoteRequest::buy(ItemId(100))]);
        assert_eq!(trader.transactions().next().unwrap().item_id, Some(ItemId(100)));
    }

    #[test]
    fn test_tick_waits_for_cooldown_then_requotes() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Feather);

        trader.tick(FRAME, &mut client);
        for _ in 0..9 {
            trader.tick(FRAME, &mut client);
        }
        assert_eq!(client.quotes().len(), 1);

        // 10 more frames: 160ms after the first request
        trader.tick(FRAME, &mut client);
        assert_eq!(client.quotes().len(), 2);
        assert!(trader.quote_pending());
    }

    #[test]
    fn test_tick_drops_unresolvable_transaction() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Ruby);
        trader.enqueue_purchase(Material::Feather);

        trader.tick(FRAME, &mut client);
        assert_eq!(trader.progress(), Progress { done: 1, total: 2 });
        assert!(client.quotes().is_empty());
        assert!(!trader.quote_pending());
        assert_eq!(trader.price(Material::Ruby), PriceState::Unknown);

        trader.tick(FRAME, &mut client);
        assert_eq!(client.quotes().len(), 1);
    }

    #[test]
    fn test_unresolvable_quote_marks_unavailable() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_quote(Material::Ruby);
        assert_eq!(trader.price(Material::Ruby), PriceState::Queued);

        trader.tick(FRAME, &mut client);
        assert_eq!(trader.price(Material::Ruby), PriceState::Unavailable);
        assert!(trader.is_idle());
    }

    #[test]
    fn test_quote_flow() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_quote(Material::Feather);

        trader.tick(FRAME, &mut client);
        assert_eq!(trader.price(Material::Feather), PriceState::Sent);

        trader.on_quoted_price(ItemId(100), 1000, &mut client);
        assert_eq!(trader.price(Material::Feather), PriceState::Known(1000));
        assert!(trader.is_idle());
        assert!(!trader.quote_pending());
        assert!(client.trades().is_empty());
        assert_eq!(trader.status(), TraderStatus::Ready);
    }

    #[test]
    fn test_buy_with_enough_gold() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Feather);
        trader.tick(FRAME, &mut client);

        trader.on_quoted_price(ItemId(100), 1000, &mut client);
        assert_eq!(client.trades(), &[TradeRequest::buy(ItemId(100), 1000)]);
        assert!(trader.trade_pending());
        assert!(!trader.quote_pending());
        assert_eq!(trader.queue_len(), 1);

        trader.on_transaction_done();
        assert!(trader.is_idle());
        assert!(!trader.trade_pending());
        assert_eq!(trader.progress(), Progress { done: 1, total: 1 });
    }

    #[test]
    fn test_buy_without_gold_cancels() {
        let mut client = merchant();
        client.set_gold(0);
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Diamond);
        trader.enqueue_purchase(Material::Diamond);
        trader.tick(FRAME, &mut client);

        trader.on_quoted_price(ItemId(102), 5000, &mut client);
        assert!(trader.is_cancelled());
        assert!(trader.is_idle());
        assert!(client.trades().is_empty());
        assert_eq!(trader.status(), TraderStatus::Cancelled);
    }

    #[test]
    fn test_buy_without_gold_withdraws_when_managed() {
        let mut client = merchant();
        client.set_gold(0);
        let mut trader = trader_with_stock(&client);
        trader.set_manage_gold(true);
        trader.enqueue_purchase(Material::Diamond);
        trader.tick(FRAME, &mut client);

        trader.on_quoted_price(ItemId(102), 5000, &mut client);
        assert_eq!(client.withdrawals(), 1);
        assert!(!trader.is_cancelled());
        assert_eq!(trader.queue_len(), 1);
        assert!(!trader.quote_pending());

        // Gold arrived, next tick re-quotes immediately
        client.set_gold(10_000);
        trader.tick(FRAME, &mut client);
        assert_eq!(client.quotes().len(), 2);
        trader.on_quoted_price(ItemId(102), 5000, &mut client);
        assert_eq!(client.trades().len(), 1);
    }

    #[test]
    fn test_sell_over_cap_cancels_or_deposits() {
        let mut client = MockClientBuilder::new()
            .gold(99_990)
            .bag_item(1, ItemId(7), Material::Bone, 12)
            .build();
        let mut trader = MaterialsTrader::new();
        trader.enqueue_sell(Material::Bone);
        trader.tick(FRAME, &mut client);
        assert_eq!(client.last_quote(), Some(&QuoteRequest::sell(ItemId(7))));

        trader.set_manage_gold(true);
        trader.on_quoted_price(ItemId(7), 50, &mut client);
        assert_eq!(client.deposits(), 1);
        assert_eq!(trader.queue_len(), 1);

        trader.set_manage_gold(false);
        trader.tick(FRAME, &mut client);
        trader.on_quoted_price(ItemId(7), 50, &mut client);
        assert!(trader.is_cancelled());
        assert!(client.trades().is_empty());
    }

    #[test]
    fn test_sell_exactly_at_cap() {
        let mut client = MockClientBuilder::new()
            .gold(99_950)
            .bag_item(1, ItemId(7), Material::Bone, 10)
            .build();
        let mut trader = MaterialsTrader::new();
        trader.enqueue_sell(Material::Bone);
        trader.tick(FRAME, &mut client);

        trader.on_quoted_price(ItemId(7), 50, &mut client);
        assert_eq!(client.trades(), &[TradeRequest::sell(ItemId(7), 50)]);
    }

    #[test]
    fn test_mismatched_quote_is_dropped() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Feather);
        trader.tick(FRAME, &mut client);

        trader.on_quoted_price(ItemId(101), 1, &mut client);
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);
        assert_eq!(trader.price(Material::PileOfGlitteringDust), PriceState::Unknown);
        assert_eq!(trader.queue_len(), 1);
        assert!(!trader.quote_pending());
        assert!(client.trades().is_empty());
    }

    #[test]
    fn test_quote_before_first_tick_is_dropped() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_purchase(Material::Feather);

        trader.on_quoted_price(ItemId(100), 1000, &mut client);
        assert_eq!(trader.queue_len(), 1);
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);
    }

    #[test]
    fn test_replies_on_empty_queue_are_ignored() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);

        trader.on_quoted_price(ItemId(100), 1000, &mut client);
        trader.on_transaction_done();
        trader.on_transaction_done();

        assert_eq!(trader.progress(), Progress::default());
        assert_eq!(trader.status(), TraderStatus::Ready);
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_quote(Material::Feather);
        trader.enqueue_purchase(Material::Feather);
        trader.tick(FRAME, &mut client);
        assert!(trader.quote_pending());

        trader.cancel();
        assert!(trader.is_cancelled());
        assert!(trader.is_idle());
        assert!(!trader.quote_pending());
        assert!(!trader.trade_pending());
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);

        // Late reply after cancel is dropped
        trader.on_quoted_price(ItemId(100), 1000, &mut client);
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);

        // Ticks do nothing while cancelled
        client.clear_requests();
        trader.tick(Duration::from_secs(1), &mut client);
        assert!(client.quotes().is_empty());
    }

    #[test]
    fn test_cancel_while_trade_pending() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.buy_materials(Material::Feather, 2);
        trader.tick(FRAME, &mut client);
        trader.on_quoted_price(ItemId(100), 1000, &mut client);
        assert!(trader.trade_pending());

        trader.cancel();
        assert!(!trader.trade_pending());
        assert!(!trader.quote_pending());
        assert!(trader.is_idle());

        // Completion of the trade already sent changes nothing
        trader.on_transaction_done();
        assert_eq!(trader.progress(), Progress { done: 0, total: 2 });
        assert_eq!(trader.status(), TraderStatus::Cancelled);
    }

    #[test]
    fn test_quote_dequeued_by_stray_done_is_not_left_computing() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.enqueue_quote(Material::Feather);
        trader.tick(FRAME, &mut client);
        assert_eq!(trader.price(Material::Feather), PriceState::Sent);

        // A completion from an earlier trade lands on the quote
        trader.on_transaction_done();
        assert!(trader.is_idle());
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);

        trader.cancel();
        for _ in 0..100 {
            trader.tick(FRAME, &mut client);
        }
        assert_eq!(trader.price(Material::Feather), PriceState::Unknown);
    }

    #[test]
    fn test_sell_flow_completes() {
        let mut client = MockClientBuilder::new()
            .gold(4950)
            .bag_item(1, ItemId(7), Material::Bone, 12)
            .build();
        let mut trader = MaterialsTrader::new();
        trader.enqueue_sell(Material::Bone);

        trader.tick(FRAME, &mut client);
        assert_eq!(client.quotes(), &[QuoteRequest::sell(ItemId(7))]);

        trader.on_quoted_price(ItemId(7), 50, &mut client);
        assert_eq!(client.trades(), &[TradeRequest::sell(ItemId(7), 50)]);
        assert!(trader.trade_pending());

        trader.on_transaction_done();
        assert!(trader.is_idle());
        assert!(!trader.trade_pending());
        assert_eq!(trader.progress(), Progress { done: 1, total: 1 });
        assert_eq!(trader.status(), TraderStatus::Ready);
    }

    #[test]
    fn test_bulk_quantity_is_capped() {
        let mut trader = MaterialsTrader::new();
        trader.buy_materials(Material::Feather, u32::MAX);
        assert_eq!(trader.queue_len(), limits::MAX_QUANTITY as usize);

        trader.cancel();
        trader.sell_materials(Material::Bone, 0);
        assert_eq!(trader.queue_len(), 1);
    }

    #[test]
    fn test_cancel_keeps_progress_counts() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);
        trader.buy_materials(Material::Feather, 3);
        trader.tick(FRAME, &mut client);
        trader.on_quoted_price(ItemId(100), 10, &mut client);
        trader.on_transaction_done();

        trader.cancel();
        assert_eq!(trader.progress(), Progress { done: 1, total: 3 });
    }

    #[test]
    fn test_item_stream_end_filters_stream_kind() {
        let client = merchant();
        let mut trader = MaterialsTrader::new();

        trader.on_item_stream_end(stream::MERCHANT_SELL_TAB, &client);
        assert!(trader.merchant_stock().is_empty());

        trader.on_item_stream_end(stream::MERCHANT_BUY_TAB, &client);
        assert_eq!(
            trader.merchant_stock(),
            &[ItemId(100), ItemId(101), ItemId(102)]
        );
    }

    #[test]
    fn test_stock_snapshot_is_replaced_wholesale() {
        let mut client = merchant();
        let mut trader = trader_with_stock(&client);

        client.clear_merchant();
        client.add_merchant_item(ItemId(200), Material::Ruby);
        trader.handle_event(TraderEvent::merchant_stock_ready(), &mut client);

        assert_eq!(trader.merchant_stock(), &[ItemId(200)]);
    }

    #[test]
    fn test_price_check_consumable() {
        let mut trader = MaterialsTrader::new();
        trader.price_check(Consumable::EssenceOfCelerity);

        let kinds: Vec<_> = trader.transactions().map(|t| (t.kind, t.material)).collect();
        assert_eq!(
            kinds,
            vec![
                (TransactionKind::Quote, Material::Feather),
                (TransactionKind::Quote, Material::PileOfGlitteringDust),
            ]
        );
        assert_eq!(trader.price(Material::Feather), PriceState::Queued);
    }

    #[test]
    fn test_buy_consumable_enqueues_plan() {
        let mut trader = MaterialsTrader::new();
        trader.buy_consumable(Consumable::GrailOfMight, 2);
        assert_eq!(trader.queue_len(), 20);
        assert_eq!(trader.progress().total, 20);
    }

    #[test]
    fn test_with_settings() {
        let settings = MaterialsSettings {
            show_menubutton: true,
            manage_gold: true,
        };
        assert!(MaterialsTrader::with_settings(&settings).manage_gold());
        assert!(!MaterialsTrader::new().manage_gold());
    }
}
