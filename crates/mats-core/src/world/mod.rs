//! Client world access: item instances, lookups and test doubles.

mod item;
pub mod locator;
mod provider;

// Mock game client for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use item::{Item, ItemId};
pub use locator::{find_bag_item, find_merchant_item};
pub use provider::{GameClient, WorldView};

// Re-export mock for convenient access in tests
#[doc(hidden)]
pub use mock::{MockClient, MockClientBuilder};
