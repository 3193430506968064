use crate::domain::address::Address;
use crate::domain::amount::Amount;
use crate::domain::event::TokenEvent;
use crate::domain::ports::{ProductStore, TokenLedger};
use crate::domain::product::Product;
use crate::domain::token::{TokenBook, TokenMetadata};
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for products.
///
/// Uses `Arc<RwLock<BTreeMap<u64, Product>>>` so that `all` comes back ordered by id.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<BTreeMap<u64, Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new, empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn store(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.id, product);
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }
}

/// A thread-safe in-memory ledger holding any number of tokens.
///
/// Each operation takes the write lock once, so a transfer either lands
/// completely or not at all.
#[derive(Default, Clone)]
pub struct InMemoryTokenLedger {
    tokens: Arc<RwLock<HashMap<Address, TokenBook>>>,
}

impl InMemoryTokenLedger {
    /// Creates a new ledger with no tokens.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenLedger for InMemoryTokenLedger {
    async fn create_token(
        &self,
        token: Address,
        creator: Address,
        metadata: TokenMetadata,
        initial_supply: Amount,
    ) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token) {
            return Err(ShopError::TokenExists(token));
        }
        tokens.insert(
            token,
            TokenBook::new(token, creator, metadata, initial_supply),
        );
        Ok(())
    }

    async fn metadata(&self, token: Address) -> Result<TokenMetadata> {
        let tokens = self.tokens.read().await;
        let book = tokens.get(&token).ok_or(ShopError::UnknownToken(token))?;
        Ok(book.metadata.clone())
    }

    async fn total_supply(&self, token: Address) -> Result<Amount> {
        let tokens = self.tokens.read().await;
        let book = tokens.get(&token).ok_or(ShopError::UnknownToken(token))?;
        Ok(book.total_supply)
    }

    async fn balance_of(&self, token: Address, holder: Address) -> Result<Amount> {
        let tokens = self.tokens.read().await;
        let book = tokens.get(&token).ok_or(ShopError::UnknownToken(token))?;
        Ok(book.balance_of(&holder))
    }

    async fn allowance(
        &self,
        token: Address,
        holder: Address,
        spender: Address,
    ) -> Result<Amount> {
        let tokens = self.tokens.read().await;
        let book = tokens.get(&token).ok_or(ShopError::UnknownToken(token))?;
        Ok(book.allowance(&holder, &spender))
    }

    async fn approve(
        &self,
        token: Address,
        holder: Address,
        spender: Address,
        value: Amount,
    ) -> Result<TokenEvent> {
        let mut tokens = self.tokens.write().await;
        let book = tokens
            .get_mut(&token)
            .ok_or(ShopError::UnknownToken(token))?;
        book.approve(holder, spender, value);
        Ok(TokenEvent::Approval {
            token,
            owner: holder,
            spender,
            value,
        })
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<TokenEvent> {
        let mut tokens = self.tokens.write().await;
        let book = tokens
            .get_mut(&token)
            .ok_or(ShopError::UnknownToken(token))?;
        book.transfer(from, to, value)?;
        Ok(TokenEvent::Transfer {
            token,
            from,
            to,
            value,
        })
    }

    async fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<TokenEvent> {
        let mut tokens = self.tokens.write().await;
        let book = tokens
            .get_mut(&token)
            .ok_or(ShopError::UnknownToken(token))?;
        book.transfer_from(spender, from, to, value)?;
        Ok(TokenEvent::Transfer {
            token,
            from,
            to,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: Address = Address::from_low_u64(0x70);
    const OWNER: Address = Address::from_low_u64(0xa);
    const BUYER: Address = Address::from_low_u64(0xb);
    const SHOP: Address = Address::from_low_u64(0x5e0);

    #[tokio::test]
    async fn test_in_memory_product_store() {
        let store = InMemoryProductStore::new();
        let product = Product::new(7, "oreo", 10);

        store.store(product.clone()).await.unwrap();
        let retrieved = store.get(7).await.unwrap().unwrap();
        assert_eq!(retrieved, product);

        assert!(store.get(8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_product_store_all_is_ordered() {
        let store = InMemoryProductStore::new();
        for id in [5, 1, 3] {
            store.store(Product::new(id, "item", 1)).await.unwrap();
        }

        let ids: Vec<u64> = store.all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let ledger = InMemoryTokenLedger::new();
        let result = ledger.balance_of(TOKEN, OWNER).await;
        assert!(matches!(result, Err(ShopError::UnknownToken(t)) if t == TOKEN));
    }

    #[tokio::test]
    async fn test_create_token_twice_fails() {
        let ledger = InMemoryTokenLedger::new();
        let metadata = TokenMetadata::new("Shop Token One", "ST1");
        ledger
            .create_token(TOKEN, BUYER, metadata.clone(), Amount::from(10_000))
            .await
            .unwrap();

        let result = ledger
            .create_token(TOKEN, OWNER, metadata, Amount::from(1))
            .await;
        assert!(matches!(result, Err(ShopError::TokenExists(_))));
        assert_eq!(
            ledger.balance_of(TOKEN, BUYER).await.unwrap(),
            Amount::from(10_000)
        );

        let metadata = ledger.metadata(TOKEN).await.unwrap();
        assert_eq!(metadata, TokenMetadata::new("Shop Token One", "ST1"));
        assert_eq!(metadata.decimals, 18);
    }

    #[tokio::test]
    async fn test_approve_then_transfer_from() {
        let ledger = InMemoryTokenLedger::new();
        ledger
            .create_token(
                TOKEN,
                BUYER,
                TokenMetadata::new("Shop Token One", "ST1"),
                Amount::from(10_000),
            )
            .await
            .unwrap();

        let approval = ledger
            .approve(TOKEN, BUYER, SHOP, Amount::from(150))
            .await
            .unwrap();
        assert_eq!(
            approval,
            TokenEvent::Approval {
                token: TOKEN,
                owner: BUYER,
                spender: SHOP,
                value: Amount::from(150),
            }
        );

        ledger
            .transfer_from(TOKEN, SHOP, BUYER, OWNER, Amount::from(150))
            .await
            .unwrap();
        assert_eq!(
            ledger.balance_of(TOKEN, OWNER).await.unwrap(),
            Amount::from(150)
        );
        assert_eq!(
            ledger.allowance(TOKEN, BUYER, SHOP).await.unwrap(),
            Amount::ZERO
        );
        assert_eq!(
            ledger.total_supply(TOKEN).await.unwrap(),
            Amount::from(10_000)
        );
    }
}
