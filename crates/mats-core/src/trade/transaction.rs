use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::material::Material;
use crate::world::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum TransactionKind {
    /// Price check only.
    Quote,
    Buy,
    Sell,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Queued trader operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub material: Material,
    /// Item instance the last quote request was sent for.
    pub item_id: Option<ItemId>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, material: Material) -> Self {
        Self {
            kind,
            material,
            item_id: None,
        }
    }

    /// Quote and Buy resolve against the merchant stock, Sell against carried bags.
    pub fn uses_merchant_stock(&self) -> bool {
        matches!(self.kind, TransactionKind::Quote | TransactionKind::Buy)
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.material)
    }
}
