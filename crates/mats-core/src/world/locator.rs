use tracing::debug;

use super::{Item, ItemId, WorldView};
use crate::config::bags;
use crate::material::Material;

/// Find the merchant's item instance for `material`.
///
/// Only ids from the cached stock snapshot are considered; ids the item
/// array does not know are skipped.
pub fn find_merchant_item<W: WorldView + ?Sized>(
    stock: &[ItemId],
    material: Material,
    world: &W,
) -> Option<Item> {
    stock
        .iter()
        .filter_map(|&id| world.item(id))
        .find(|item| item.is_material(material))
}

/// Find a carried stack of `material` large enough to sell.
///
/// Bags are searched in order (backpack first). A stack qualifies when it
/// holds at least one trade unit: ten for common materials, one for rare.
pub fn find_bag_item<W: WorldView + ?Sized>(material: Material, world: &W) -> Option<Item> {
    let min_quantity = material.tier().min_sell_quantity();

    for bag in bags::CARRIED {
        let Some(items) = world.bag_items(bag) else {
            continue;
        };
        if let Some(item) = items
            .into_iter()
            .find(|item| item.is_material(material) && item.quantity >= min_quantity)
        {
            return Some(item);
        }
    }

    debug!(
        "No stack of {} with at least {} units in carried bags",
        material, min_quantity
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::mock::MockClientBuilder;

    #[test]
    fn test_find_merchant_item() {
        let client = MockClientBuilder::new()
            .merchant_item(ItemId(100), Material::Feather)
            .merchant_item(ItemId(101), Material::PileOfGlitteringDust)
            .build();
        let stock = client.merchant_items();

        let item = find_merchant_item(&stock, Material::PileOfGlitteringDust, &client).unwrap();
        assert_eq!(item.id, ItemId(101));
        assert!(find_merchant_item(&stock, Material::Bone, &client).is_none());
    }

    #[test]
    fn test_find_merchant_item_returns_first_match() {
        let client = MockClientBuilder::new()
            .merchant_item(ItemId(5), Material::Ruby)
            .merchant_item(ItemId(6), Material::Ruby)
            .build();
        let stock = client.merchant_items();

        let item = find_merchant_item(&stock, Material::Ruby, &client).unwrap();
        assert_eq!(item.id, ItemId(5));
    }

    #[test]
    fn test_find_merchant_item_skips_unknown_ids() {
        let client = MockClientBuilder::new()
            .merchant_item(ItemId(100), Material::Feather)
            .build();
        let stock = vec![ItemId(999), ItemId(100)];

        let item = find_merchant_item(&stock, Material::Feather, &client).unwrap();
        assert_eq!(item.id, ItemId(100));
    }

    #[test]
    fn test_find_merchant_item_uses_snapshot_only() {
        let client = MockClientBuilder::new()
            .merchant_item(ItemId(100), Material::Feather)
            .build();

        assert!(find_merchant_item(&[], Material::Feather, &client).is_none());
    }

    #[test]
    fn test_find_bag_item_common_threshold() {
        let client = MockClientBuilder::new()
            .bag_item(1, ItemId(10), Material::Bone, 9)
            .bag_item(2, ItemId(11), Material::Bone, 12)
            .build();

        let item = find_bag_item(Material::Bone, &client).unwrap();
        assert_eq!(item.id, ItemId(11));
    }

    #[test]
    fn test_find_bag_item_common_below_threshold() {
        let client = MockClientBuilder::new()
            .bag_item(1, ItemId(10), Material::Bone, 9)
            .build();

        assert!(find_bag_item(Material::Bone, &client).is_none());
    }

    #[test]
    fn test_find_bag_item_rare_threshold() {
        let client = MockClientBuilder::new()
            .bag_item(3, ItemId(20), Material::Diamond, 1)
            .build();

        let item = find_bag_item(Material::Diamond, &client).unwrap();
        assert_eq!(item.id, ItemId(20));
    }

    #[test]
    fn test_find_bag_item_ignores_uncarried_bags() {
        // Bag 5 is the equipment pack, not searched
        let client = MockClientBuilder::new()
            .bag_item(5, ItemId(30), Material::Ruby, 50)
            .build();

        assert!(find_bag_item(Material::Ruby, &client).is_none());
    }

    #[test]
    fn test_find_bag_item_no_bags() {
        let client = MockClientBuilder::new().build();
        assert!(find_bag_item(Material::Bone, &client).is_none());
    }
}
