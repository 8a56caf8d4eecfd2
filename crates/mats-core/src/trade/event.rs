use serde::{Deserialize, Serialize};

use crate::config::stream;
use crate::world::ItemId;

/// Server reply relevant to the trader, delivered by the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraderEvent {
    /// Price quote for an item.
    QuotedItemPrice { item_id: ItemId, price: u32 },
    /// A trade request finished. Carries no correlation id.
    TransactionDone,
    /// The server finished streaming the items of a window.
    ItemStreamEnd { stream: u32 },
}

impl TraderEvent {
    pub fn quote(item_id: ItemId, price: u32) -> Self {
        Self::QuotedItemPrice { item_id, price }
    }

    /// Stream end for the merchant "buy" tab.
    pub fn merchant_stock_ready() -> Self {
        Self::ItemStreamEnd {
            stream: stream::MERCHANT_BUY_TAB,
        }
    }
}
