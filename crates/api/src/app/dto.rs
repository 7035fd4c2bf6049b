use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcart_checkout::{CartView, CheckoutReceipt};
use shopcart_core::{DomainResult, Price};
use shopcart_inventory::{Item, ItemDraft};

// -------------------------
// Request DTOs
// -------------------------

/// Wire form of an item write: `{"title": .., "price": .., "inventory_count": ..}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub title: String,
    pub price: f64,
    pub inventory_count: u64,
}

impl ItemRequest {
    pub fn into_draft(self) -> DomainResult<ItemDraft> {
        let price = Price::from_decimal(self.price)?;
        Ok(ItemDraft::new(self.title, price, self.inventory_count))
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub title: String,
    pub price: f64,
    pub inventory_count: u64,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title().to_string(),
            price: item.price().to_decimal(),
            inventory_count: item.stock(),
        }
    }
}

pub fn items_to_json(items: &[Item]) -> Vec<ItemResponse> {
    items.iter().map(ItemResponse::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    pub owner: String,
    pub items: Vec<ItemResponse>,
    pub total_cost: f64,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            owner: view.owner.to_string(),
            items: items_to_json(&view.items),
            total_cost: view.total_cost.to_decimal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub purchased: Vec<ItemResponse>,
    pub unable_to_purchase: Vec<ItemResponse>,
    pub total_cost: f64,
    pub completed_at: DateTime<Utc>,
}

impl From<CheckoutReceipt> for CheckoutResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            purchased: items_to_json(&receipt.purchased),
            unable_to_purchase: items_to_json(&receipt.rejected),
            total_cost: receipt.total_cost.to_decimal(),
            completed_at: receipt.completed_at,
        }
    }
}
