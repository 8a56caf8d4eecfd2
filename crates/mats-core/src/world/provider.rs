//! Game client abstraction for testability.
//!
//! The trader never touches client globals directly. It reads the world
//! through [`WorldView`] and sends requests through
//! [`TradeGateway`](crate::trade::TradeGateway), so tests and the simulator
//! can stand in for the live client.

use super::{Item, ItemId};
use crate::trade::TradeGateway;

/// Read-only snapshot of the client state the trader needs.
pub trait WorldView {
    /// Item ids offered by the open merchant, in window order.
    fn merchant_items(&self) -> Vec<ItemId>;

    /// Look up an item instance. `None` for ids outside the item array.
    fn item(&self, id: ItemId) -> Option<Item>;

    /// Items of a carried bag, in slot order. `None` if the bag is absent.
    fn bag_items(&self, bag: u32) -> Option<Vec<Item>>;

    /// Gold carried by the character.
    fn gold_on_character(&self) -> u32;
}

/// A client that can both be observed and receive trade requests.
pub trait GameClient: WorldView + TradeGateway {}

impl<T: WorldView + TradeGateway> GameClient for T {}
