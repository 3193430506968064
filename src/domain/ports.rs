use super::address::Address;
use super::amount::Amount;
use super::event::TokenEvent;
use super::product::Product;
use super::token::TokenMetadata;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn store(&self, product: Product) -> Result<()>;
    async fn get(&self, id: u64) -> Result<Option<Product>>;
    /// Every stored product, ordered by id.
    async fn all(&self) -> Result<Vec<Product>>;
}

/// The external token contract the shop settles purchases through.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    async fn create_token(
        &self,
        token: Address,
        creator: Address,
        metadata: TokenMetadata,
        initial_supply: Amount,
    ) -> Result<()>;
    async fn metadata(&self, token: Address) -> Result<TokenMetadata>;
    async fn total_supply(&self, token: Address) -> Result<Amount>;
    async fn balance_of(&self, token: Address, holder: Address) -> Result<Amount>;
    async fn allowance(&self, token: Address, holder: Address, spender: Address)
    -> Result<Amount>;
    async fn approve(
        &self,
        token: Address,
        holder: Address,
        spender: Address,
        value: Amount,
    ) -> Result<TokenEvent>;
    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<TokenEvent>;
    async fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<TokenEvent>;
}

pub type ProductStoreBox = Box<dyn ProductStore>;
pub type TokenLedgerBox = Box<dyn TokenLedger>;
pub type ProductStoreFactory = Box<dyn Fn() -> ProductStoreBox + Send + Sync>;
