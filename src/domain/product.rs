use super::address::Address;
use super::amount::Amount;
use crate::error::ShopError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A shop listing: name, remaining stock and one unit price per payment token.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub stock: u64,
    pub listed: bool,
    /// Unit price per payment token. A missing entry reads as zero.
    #[serde(default)]
    pub prices: BTreeMap<Address, Amount>,
}

/// The `(name, stock, listed)` projection of a product.
///
/// An id that was never added reads as the empty default.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct ProductView {
    pub name: String,
    pub stock: u64,
    pub listed: bool,
}

impl Product {
    /// Creates a listed product with no prices.
    pub fn new(id: u64, name: impl Into<String>, stock: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            listed: true,
            prices: BTreeMap::new(),
        }
    }

    pub fn price(&self, token: &Address) -> Amount {
        self.prices.get(token).copied().unwrap_or(Amount::ZERO)
    }

    /// Overwrites the unit price for `token`. Setting zero clears it.
    pub fn set_price(&mut self, token: Address, price: Amount) {
        if price.is_zero() {
            self.prices.remove(&token);
        } else {
            self.prices.insert(token, price);
        }
    }

    /// Checks that one unit can be bought for exactly `amount` of `token`.
    pub fn check_purchase(&self, token: &Address, amount: Amount) -> Result<(), ShopError> {
        if !self.listed {
            return Err(ShopError::NotListed(self.id));
        }
        if self.stock == 0 {
            return Err(ShopError::OutOfStock(self.id));
        }
        let price = self.price(token);
        if price.is_zero() {
            return Err(ShopError::PriceNotSet {
                id: self.id,
                token: *token,
            });
        }
        if price != amount {
            return Err(ShopError::PriceMismatch {
                expected: price,
                supplied: amount,
            });
        }
        Ok(())
    }

    /// Removes one unit from stock.
    pub fn take_one(&mut self) -> Result<(), ShopError> {
        self.stock = self
            .stock
            .checked_sub(1)
            .ok_or(ShopError::OutOfStock(self.id))?;
        Ok(())
    }

    pub fn view(&self) -> ProductView {
        ProductView {
            name: self.name.clone(),
            stock: self.stock,
            listed: self.listed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Address {
        Address::from_low_u64(1)
    }

    #[test]
    fn test_new_product_is_listed_without_prices() {
        let product = Product::new(0, "oreo", 10);
        assert_eq!(
            product.view(),
            ProductView {
                name: "oreo".to_string(),
                stock: 10,
                listed: true
            }
        );
        assert_eq!(product.price(&token()), Amount::ZERO);
    }

    #[test]
    fn test_set_price_overwrites_and_zero_clears() {
        let mut product = Product::new(0, "oreo", 10);
        product.set_price(token(), Amount::from(50));
        product.set_price(token(), Amount::from(75));
        assert_eq!(product.price(&token()), Amount::from(75));

        product.set_price(token(), Amount::ZERO);
        assert!(product.prices.is_empty());
    }

    #[test]
    fn test_check_purchase_requires_exact_price() {
        let mut product = Product::new(0, "oreo", 10);
        assert!(matches!(
            product.check_purchase(&token(), Amount::from(50)),
            Err(ShopError::PriceNotSet { id: 0, .. })
        ));

        product.set_price(token(), Amount::from(50));
        assert!(product.check_purchase(&token(), Amount::from(50)).is_ok());
        assert!(matches!(
            product.check_purchase(&token(), Amount::from(60)),
            Err(ShopError::PriceMismatch { .. })
        ));
    }

    #[test]
    fn test_check_purchase_rejects_empty_stock() {
        let mut product = Product::new(3, "oreo", 0);
        product.set_price(token(), Amount::from(50));
        assert!(matches!(
            product.check_purchase(&token(), Amount::from(50)),
            Err(ShopError::OutOfStock(3))
        ));
    }

    #[test]
    fn test_take_one() {
        let mut product = Product::new(0, "oreo", 1);
        product.take_one().unwrap();
        assert_eq!(product.stock, 0);
        assert!(matches!(product.take_one(), Err(ShopError::OutOfStock(0))));
        assert_eq!(product.stock, 0);
    }
}
