//! # Checkout
//!
//! Submission of a cart: promotions, stock removal and the status change
//! happen in one store transaction.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PUT /cart/{id}/status/submitted                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  with_transaction(|tx| {                                                │
//! │      1. load cart            ── submitted already? → CartNotAvailable   │
//! │      2. promotions.apply_all(CartDelegate { cart, tx })                 │
//! │            ├── add_purchase → reserve item, then cart.purchase          │
//! │            └── add_discount → cart.discount                             │
//! │      3. for each line: item.remove(qty), store item                     │
//! │      4. cart.submit(), store cart                                       │
//! │  })                                                                     │
//! │       │                                                                 │
//! │       ├── Ok  → every change above commits together                     │
//! │       └── Err → none of them happened                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flipshop_core::{Cart, CoreError, Money, PromotionDelegate, PromotionSet, PurchasedItem, Sku};
use flipshop_db::{Database, DbError, DbResult, ItemRepository, Transaction};
use tracing::debug;

// =============================================================================
// Cart Delegate
// =============================================================================

/// Gives promotion rules access to one cart inside an open transaction.
pub struct CartDelegate<'a> {
    cart: &'a mut Cart,
    tx: &'a mut Transaction,
    items: &'a ItemRepository,
}

impl<'a> CartDelegate<'a> {
    pub fn new(cart: &'a mut Cart, tx: &'a mut Transaction, items: &'a ItemRepository) -> Self {
        CartDelegate { cart, tx, items }
    }
}

impl PromotionDelegate for CartDelegate<'_> {
    type Error = DbError;

    fn purchased(&self, sku: &Sku) -> Option<PurchasedItem> {
        self.cart.purchase_for(sku.as_str()).map(|line| PurchasedItem {
            sku: line.sku.clone(),
            name: line.name.clone(),
            price: line.price,
            qty: line.qty,
            discount: line.discount,
        })
    }

    fn add_purchase(&mut self, sku: &Sku, qty: i64) -> DbResult<()> {
        let mut item = self.items.find_by_sku(self.tx, sku.as_str())?;
        item.reserve(qty)?;
        self.cart.purchase(&item, qty)?;
        self.items.store(self.tx, &item)?;

        debug!(cart_id = %self.cart.cart_id, sku = %sku, qty, "Promotion added purchase");
        Ok(())
    }

    fn add_discount(&mut self, sku: &Sku, amount: Money) -> DbResult<()> {
        self.cart.discount(sku, amount)?;

        debug!(cart_id = %self.cart.cart_id, sku = %sku, amount = %amount, "Promotion added discount");
        Ok(())
    }
}

// =============================================================================
// Submission
// =============================================================================

/// Submits a cart. Returns the submitted cart with its total.
///
/// ## Errors
/// - `CartNotFound` for an unknown id
/// - `Core(CartNotAvailable)` when the cart was already submitted
/// - any promotion or stock failure; the store is then left untouched
pub fn submit_cart(db: &Database, promotions: &PromotionSet, cart_id: &str) -> DbResult<Cart> {
    let items = db.items();
    let carts = db.carts();

    db.with_transaction(|tx| -> DbResult<Cart> {
        let mut cart = carts.find_by_id_in(tx, cart_id)?;
        if !cart.is_available() {
            return Err(CoreError::CartNotAvailable {
                cart_id: cart.cart_id.clone(),
            }
            .into());
        }

        promotions.apply_all(&mut CartDelegate::new(&mut cart, tx, &items))?;

        for line in cart.purchases.values() {
            let mut item = items.find_by_sku(tx, line.sku.as_str())?;
            item.remove(line.qty)?;
            items.store(tx, &item)?;
        }

        cart.submit()?;
        carts.store(tx, &cart)?;

        Ok(cart)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use flipshop_core::{catalog, CartStatus, Item};
    use flipshop_db::seed;

    fn seeded() -> Database {
        let db = Database::new();
        seed::seed_inventory(&db, seed::default_inventory()).unwrap();
        db
    }

    fn cart_with(db: &Database, lines: &[(&str, i64)]) -> Cart {
        let cart = db.carts().create().unwrap();
        db.with_transaction(|tx| -> DbResult<Cart> {
            let mut cart = db.carts().find_by_id_in(tx, &cart.cart_id)?;
            for &(sku, qty) in lines {
                let mut item = db.items().find_by_sku(tx, sku)?;
                item.reserve(qty)?;
                cart.purchase(&item, qty)?;
                db.items().store(tx, &item)?;
            }
            db.carts().store(tx, &cart)?;
            Ok(cart)
        })
        .unwrap()
    }

    fn item(db: &Database, sku: &str) -> Item {
        db.items().find_by_sku_committed(sku).unwrap()
    }

    #[test]
    fn test_submit_removes_reserved_stock() {
        let db = seeded();
        let cart = cart_with(&db, &[(catalog::ALEXA_SPEAKER_SKU, 3)]);

        let submitted = submit_cart(&db, &PromotionSet::standard(), &cart.cart_id).unwrap();

        // 3 is not above the threshold, no discount.
        assert_eq!(submitted.total.cents(), 32850);
        assert_eq!(submitted.status, CartStatus::Submitted);

        let speaker = item(&db, catalog::ALEXA_SPEAKER_SKU);
        assert_eq!(speaker.qty_available, 7);
        assert_eq!(speaker.qty_reserved, 0);
    }

    #[test]
    fn test_free_item_is_added_and_offset() {
        let db = seeded();
        let cart = cart_with(&db, &[(catalog::MACBOOK_PRO_SKU, 1)]);

        let submitted = submit_cart(&db, &PromotionSet::standard(), &cart.cart_id).unwrap();

        let pi = submitted.purchase_for(catalog::RASPBERRY_PI_SKU).unwrap();
        assert_eq!(pi.qty, 1);
        assert_eq!(pi.discount.cents(), 3000);
        assert_eq!(submitted.total.cents(), 539999);

        assert_eq!(item(&db, catalog::MACBOOK_PRO_SKU).qty_available, 4);
        let pi = item(&db, catalog::RASPBERRY_PI_SKU);
        assert_eq!(pi.qty_available, 1);
        assert_eq!(pi.qty_reserved, 0);
    }

    #[test]
    fn test_buy_three_google_homes_pay_two() {
        let db = seeded();
        let cart = cart_with(&db, &[(catalog::GOOGLE_HOME_SKU, 3)]);

        let submitted = submit_cart(&db, &PromotionSet::standard(), &cart.cart_id).unwrap();
        assert_eq!(submitted.total.cents(), 9998);
    }

    #[test]
    fn test_unavailable_free_item_rolls_everything_back() {
        let db = seeded();
        // Three laptops need three free Raspberry Pis; only two exist.
        let cart = cart_with(&db, &[(catalog::MACBOOK_PRO_SKU, 3)]);

        let err = submit_cart(&db, &PromotionSet::standard(), &cart.cart_id).unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::ReservationUnavailable { .. })
        ));

        let stored = db.carts().find_by_id(&cart.cart_id).unwrap();
        assert_eq!(stored, cart);

        let laptop = item(&db, catalog::MACBOOK_PRO_SKU);
        assert_eq!(laptop.qty_available, 5);
        assert_eq!(laptop.qty_reserved, 3);
        assert_eq!(item(&db, catalog::RASPBERRY_PI_SKU).qty_reserved, 0);
    }

    #[test]
    fn test_second_submit_fails() {
        let db = seeded();
        let cart = cart_with(&db, &[(catalog::GOOGLE_HOME_SKU, 1)]);
        let promotions = PromotionSet::standard();

        submit_cart(&db, &promotions, &cart.cart_id).unwrap();
        let err = submit_cart(&db, &promotions, &cart.cart_id).unwrap_err();

        assert!(matches!(
            err,
            DbError::Core(CoreError::CartNotAvailable { .. })
        ));
        assert_eq!(item(&db, catalog::GOOGLE_HOME_SKU).qty_available, 9);
    }

    #[test]
    fn test_unknown_cart() {
        let db = seeded();
        let err = submit_cart(&db, &PromotionSet::standard(), "missing").unwrap_err();
        assert_eq!(err, DbError::CartNotFound("missing".to_string()));
    }

    #[test]
    fn test_empty_cart_submits_with_zero_total() {
        let db = seeded();
        let cart = db.carts().create().unwrap();

        let submitted = submit_cart(&db, &PromotionSet::standard(), &cart.cart_id).unwrap();
        assert!(submitted.total.is_zero());
        assert_eq!(submitted.status, CartStatus::Submitted);
    }
}
