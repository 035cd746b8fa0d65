//! # Shop Catalog
//!
//! The four SKUs the shop launches with. The default inventory and the
//! standard promotions both refer to these.

pub const GOOGLE_HOME_SKU: &str = "120P90";
pub const GOOGLE_HOME_NAME: &str = "Google Home";
pub const GOOGLE_HOME_PRICE: i64 = 4999;
pub const GOOGLE_HOME_QTY: i64 = 10;

pub const MACBOOK_PRO_SKU: &str = "43N23P";
pub const MACBOOK_PRO_NAME: &str = "MacBook Pro";
pub const MACBOOK_PRO_PRICE: i64 = 539999;
pub const MACBOOK_PRO_QTY: i64 = 5;

pub const ALEXA_SPEAKER_SKU: &str = "A304SD";
pub const ALEXA_SPEAKER_NAME: &str = "Alexa Speaker";
pub const ALEXA_SPEAKER_PRICE: i64 = 10950;
pub const ALEXA_SPEAKER_QTY: i64 = 10;

pub const RASPBERRY_PI_SKU: &str = "234234";
pub const RASPBERRY_PI_NAME: &str = "Raspberry Pi B";
pub const RASPBERRY_PI_PRICE: i64 = 3000;
pub const RASPBERRY_PI_QTY: i64 = 2;

/// `(sku, name, price_cents, qty)` rows of the launch inventory.
pub const DEFAULT_INVENTORY: [(&str, &str, i64, i64); 4] = [
    (GOOGLE_HOME_SKU, GOOGLE_HOME_NAME, GOOGLE_HOME_PRICE, GOOGLE_HOME_QTY),
    (MACBOOK_PRO_SKU, MACBOOK_PRO_NAME, MACBOOK_PRO_PRICE, MACBOOK_PRO_QTY),
    (ALEXA_SPEAKER_SKU, ALEXA_SPEAKER_NAME, ALEXA_SPEAKER_PRICE, ALEXA_SPEAKER_QTY),
    (RASPBERRY_PI_SKU, RASPBERRY_PI_NAME, RASPBERRY_PI_PRICE, RASPBERRY_PI_QTY),
];
