//! Configuration and tunables.
//!
//! This module contains:
//! - `MaterialsSettings` - the persisted `[Materials]` INI section
//! - Timing, gold, bag and item-stream constants used by the trader

mod settings;

pub use settings::*;

/// Driver timing configuration.
///
/// A request is considered outstanding for at least one cooldown window
/// (about 10 frames at 60 fps) before the trader re-issues it.
pub mod timing {
    use std::time::Duration;

    /// Minimum time between two requests for the same head transaction.
    pub const RETRY_COOLDOWN: Duration = Duration::from_millis(160);

    /// Nominal frame length used by the simulator and the CLI loop.
    pub const FRAME: Duration = Duration::from_millis(16);
}

/// Gold limits enforced by the game client.
pub mod gold {
    /// Maximum gold a character can carry.
    pub const CHARACTER_GOLD_CAP: u32 = 100_000;

    /// Maximum gold the account storage can hold.
    pub const STORAGE_GOLD_CAP: u32 = 1_000_000;
}

/// Carried inventory containers searched when selling.
pub mod bags {
    use std::ops::RangeInclusive;

    /// Backpack.
    pub const BACKPACK: u32 = 1;

    /// Second equipment bag (last carried container).
    pub const BAG_2: u32 = 4;

    /// Backpack, belt pouch, bag 1 and bag 2, in search order.
    pub const CARRIED: RangeInclusive<u32> = BACKPACK..=BAG_2;
}

/// Bounds on user-entered quantities.
pub mod limits {
    /// Largest quantity a single buy or sell action may enqueue.
    pub const MAX_QUANTITY: u32 = 1000;
}

/// Item stream tags sent by the server when a merchant window is populated.
pub mod stream {
    /// Items the merchant offers for sale (the "buy" tab).
    pub const MERCHANT_BUY_TAB: u32 = 12;

    /// Items the player may sell (the "sell" tab).
    pub const MERCHANT_SELL_TAB: u32 = 13;
}
