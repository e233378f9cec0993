//! Order submission types.

use serde::Serialize;

use bazaar_core::ProductId;

/// One product and quantity in an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            items: vec![
                OrderItem {
                    product_id: ProductId::new(1),
                    quantity: 3,
                },
                OrderItem {
                    product_id: ProductId::new(2),
                    quantity: 1,
                },
            ],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [
                    {"product_id": 1, "quantity": 3},
                    {"product_id": 2, "quantity": 1}
                ]
            })
        );
    }
}
