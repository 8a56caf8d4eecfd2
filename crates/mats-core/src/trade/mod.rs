//! Transaction queue and the trader state machine.

mod event;
mod gateway;
mod queue;
mod session;
mod trader;
mod transaction;

pub use event::TraderEvent;
pub use gateway::{QuoteRequest, TradeDirection, TradeGateway, TradeRequest};
pub use queue::{Progress, TransactionQueue};
pub use session::{TradeSession, event_channel};
pub use trader::{MaterialsTrader, TraderStatus};
pub use transaction::{Transaction, TransactionKind};
