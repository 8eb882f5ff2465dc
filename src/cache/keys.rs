//! Cache key scheme.
//!
//! Every cached entity gets its key from one of the builders here, shaped
//! `kind:arg1:arg2…`. Builders are pure, so equal inputs always give equal
//! keys and substring invalidation can find them again.
//!
//! Dynamic components (ids, categories, pages, periods) should come from a
//! bounded set. Each distinct value mints a new key that only TTL expiry
//! reclaims.

use std::fmt::{self, Display};

/// Category used by [`products`] when no filter is given.
pub const ALL_CATEGORIES: &str = "all";

/// Page used by [`products`] when none is given.
pub const FIRST_PAGE: u32 = 1;

/// Key namespace, one per cached entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    User,
    Product,
    Products,
    Shop,
    Wishlist,
    Cart,
    Orders,
    Analytics,
}

impl KeyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyKind::User => "user",
            KeyKind::Product => "product",
            KeyKind::Products => "products",
            KeyKind::Shop => "shop",
            KeyKind::Wishlist => "wishlist",
            KeyKind::Cart => "cart",
            KeyKind::Orders => "orders",
            KeyKind::Analytics => "analytics",
        }
    }

    /// `kind:` prefix, usable as an invalidation pattern for the whole kind.
    ///
    /// The trailing colon keeps `product:` from matching `products:` keys.
    pub fn prefix(self) -> String {
        format!("{}:", self.as_str())
    }
}

impl Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn single(kind: KeyKind, id: impl Display) -> String {
    format!("{kind}:{id}")
}

pub fn user(user_id: impl Display) -> String {
    single(KeyKind::User, user_id)
}

pub fn product(product_id: impl Display) -> String {
    single(KeyKind::Product, product_id)
}

pub fn shop(shop_id: impl Display) -> String {
    single(KeyKind::Shop, shop_id)
}

pub fn wishlist(user_id: impl Display) -> String {
    single(KeyKind::Wishlist, user_id)
}

pub fn cart(user_id: impl Display) -> String {
    single(KeyKind::Cart, user_id)
}

pub fn orders(user_id: impl Display) -> String {
    single(KeyKind::Orders, user_id)
}

/// Product listing key.
///
/// A missing category means [`ALL_CATEGORIES`] and a missing page means
/// [`FIRST_PAGE`], so `products(None, None)` and `products(Some("all"), Some(1))`
/// name the same cached listing.
pub fn products(category: Option<&str>, page: Option<u32>) -> String {
    let category = category.unwrap_or(ALL_CATEGORIES);
    let page = page.unwrap_or(FIRST_PAGE);
    format!("{}:{category}:{page}", KeyKind::Products)
}

/// Aggregated analytics key, e.g. `analytics("sales", "2024-05")`.
pub fn analytics(kind: impl Display, period: impl Display) -> String {
    format!("{}:{kind}:{period}", KeyKind::Analytics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_keys() {
        assert_eq!(user(7), "user:7");
        assert_eq!(product("sku-9"), "product:sku-9");
        assert_eq!(shop(3), "shop:3");
        assert_eq!(wishlist(7), "wishlist:7");
        assert_eq!(cart(7), "cart:7");
        assert_eq!(orders(7), "orders:7");
    }

    #[test]
    fn test_products_defaults_collide() {
        assert_eq!(products(None, None), "products:all:1");
        assert_eq!(products(None, None), products(Some(ALL_CATEGORIES), Some(FIRST_PAGE)));
        assert_eq!(products(Some("electronics"), None), "products:electronics:1");
        assert_eq!(products(None, Some(3)), "products:all:3");
    }

    #[test]
    fn test_products_is_deterministic() {
        let first = products(Some("electronics"), Some(2));
        let second = products(Some("electronics"), Some(2));
        assert_eq!(first, second);
        assert_eq!(first, "products:electronics:2");
    }

    #[test]
    fn test_analytics_key() {
        assert_eq!(analytics("revenue", "monthly"), "analytics:revenue:monthly");
    }

    #[test]
    fn test_prefix_does_not_cover_plural_kind() {
        let pattern = KeyKind::Product.prefix();
        assert!(product(42).contains(&pattern));
        assert!(!products(Some("electronics"), Some(1)).contains(&pattern));
    }
}
