use crate::domain::address::Address;
use crate::domain::amount::Amount;
use crate::domain::event::ShopEvent;
use crate::domain::ports::{ProductStoreBox, TokenLedger, TokenLedgerBox};
use crate::domain::product::{Product, ProductView};
use crate::error::{Result, ShopError};
use tokio::sync::Mutex;
use tracing::{debug, error, instrument, warn};

/// Owner-gated product ledger that sells single units for pre-approved token amounts.
///
/// Every mutating call runs inside one transaction boundary (`journal`'s mutex), so
/// calls on the same shop are applied one at a time and a failed call leaves no
/// trace in the product store or the token ledger.
pub struct Shop {
    owner: Address,
    address: Address,
    products: ProductStoreBox,
    tokens: TokenLedgerBox,
    /// `None` unless the shop was built [`with_journal`](Shop::with_journal).
    journal: Mutex<Option<Vec<ShopEvent>>>,
}

impl Shop {
    /// Creates a shop owned by `owner`.
    ///
    /// # Arguments
    ///
    /// * `owner` - The only principal allowed to add products and set prices.
    /// * `address` - The shop's own identity; buyers approve it as spender.
    /// * `products` - Where listings are kept.
    /// * `tokens` - The token ledger purchases are settled on.
    pub fn new(
        owner: Address,
        address: Address,
        products: ProductStoreBox,
        tokens: TokenLedgerBox,
    ) -> Self {
        Self {
            owner,
            address,
            products,
            tokens,
            journal: Mutex::new(None),
        }
    }

    /// Keeps every event emitted by a successful call, readable through [`Shop::events`].
    pub fn with_journal(mut self) -> Self {
        *self.journal.get_mut() = Some(Vec::new());
        self
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The token ledger this shop settles on.
    pub fn tokens(&self) -> &dyn TokenLedger {
        self.tokens.as_ref()
    }

    fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller == self.owner {
            Ok(())
        } else {
            warn!(%caller, "caller is not the owner");
            Err(ShopError::NotOwner { caller })
        }
    }

    async fn listed(&self, id: u64) -> Result<Product> {
        match self.products.get(id).await? {
            Some(product) if product.listed => Ok(product),
            _ => Err(ShopError::NotListed(id)),
        }
    }

    #[instrument(skip(self, name), fields(name = %name))]
    pub async fn add_product(
        &self,
        caller: Address,
        id: u64,
        name: &str,
        stock: u64,
    ) -> Result<ShopEvent> {
        let mut journal = self.journal.lock().await;
        self.ensure_owner(caller)?;

        if let Some(existing) = self.products.get(id).await? {
            if existing.listed {
                return Err(ShopError::AlreadyListed(id));
            }
        }

        self.products.store(Product::new(id, name, stock)).await?;

        let event = ShopEvent::ProductAdded {
            id,
            name: name.to_string(),
            stock,
        };
        record(&mut journal, &event);
        debug!("product listed");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn set_price(
        &self,
        caller: Address,
        id: u64,
        token: Address,
        price: Amount,
    ) -> Result<ShopEvent> {
        let mut journal = self.journal.lock().await;
        self.ensure_owner(caller)?;

        let mut product = self.listed(id).await?;
        product.set_price(token, price);
        self.products.store(product).await?;

        let event = ShopEvent::PriceSet { id, token, price };
        record(&mut journal, &event);
        debug!("price set");
        Ok(event)
    }

    /// Unit price of `id` in `token`; zero if unset or if the product does not exist.
    pub async fn get_product_price(&self, id: u64, token: Address) -> Result<Amount> {
        Ok(self
            .products
            .get(id)
            .await?
            .map(|product| product.price(&token))
            .unwrap_or(Amount::ZERO))
    }

    /// `(name, stock, listed)` of `id`; the empty default if it was never added.
    pub async fn products(&self, id: u64) -> Result<ProductView> {
        Ok(self
            .products
            .get(id)
            .await?
            .map(|product| product.view())
            .unwrap_or_default())
    }

    /// Every product in id order.
    pub async fn all_products(&self) -> Result<Vec<Product>> {
        self.products.all().await
    }

    /// Sells one unit of `id` to `buyer` for exactly `amount` of `token`.
    ///
    /// The shop pulls `amount` from `buyer` into the owner's wallet using the allowance
    /// `buyer` granted to the shop's address. Token ledger failures are returned as-is.
    ///
    /// Stock is written before payment, and put back if the payment fails. Should that
    /// write fail too, both errors come back as [`ShopError::InternalError`].
    #[instrument(skip(self))]
    pub async fn buy_with_tokens(
        &self,
        buyer: Address,
        amount: Amount,
        token: Address,
        id: u64,
    ) -> Result<ShopEvent> {
        let mut journal = self.journal.lock().await;

        let previous = self.listed(id).await?;
        previous.check_purchase(&token, amount)?;
        let mut product = previous.clone();
        product.take_one()?;
        self.products.store(product).await?;

        let payment = self
            .tokens
            .transfer_from(token, self.address, buyer, self.owner, amount)
            .await;
        if let Err(err) = payment {
            debug!(error = %err, "payment failed, restoring stock");
            if let Err(restore) = self.products.store(previous).await {
                error!(payment = %err, restore = %restore, "stock not restored after failed payment");
                return Err(ShopError::InternalError(
                    format!("payment failed ({err}) and stock could not be restored ({restore})")
                        .into(),
                ));
            }
            return Err(err);
        }

        let event = ShopEvent::Purchased { id, buyer, token };
        record(&mut journal, &event);
        debug!("purchase settled");
        Ok(event)
    }

    /// Events emitted by successful calls, oldest first. Empty without a journal.
    pub async fn events(&self) -> Vec<ShopEvent> {
        self.journal.lock().await.clone().unwrap_or_default()
    }
}

fn record(journal: &mut Option<Vec<ShopEvent>>, event: &ShopEvent) {
    if let Some(events) = journal {
        events.push(event.clone());
    }
}
