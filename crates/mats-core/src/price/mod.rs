//! Price cache and price readouts.

pub mod display;
mod table;

pub use display::{
    PriceEstimate, consumable_price, format_consumable_price, format_full_conset_price,
    format_price, full_conset_price,
};
pub use table::{PriceState, PriceTable};
