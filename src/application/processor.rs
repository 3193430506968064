use super::shop::Shop;
use crate::domain::command::Command;
use crate::domain::event::Event;
use crate::domain::product::Product;
use crate::domain::token::TokenMetadata;
use crate::error::Result;
use tracing::info;

/// Applies validated commands to a [`Shop`] and its token ledger, one at a time.
pub struct CommandProcessor {
    shop: Shop,
}

impl CommandProcessor {
    pub fn new(shop: Shop) -> Self {
        Self { shop }
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Runs one command and returns the events it emitted.
    ///
    /// A failed command emits nothing and changes nothing.
    pub async fn process(&self, command: Command) -> Result<Vec<Event>> {
        let events: Vec<Event> = match command {
            Command::DeployToken {
                creator,
                token,
                name,
                symbol,
                supply,
            } => {
                self.shop
                    .tokens()
                    .create_token(token, creator, TokenMetadata::new(name, symbol), supply)
                    .await?;
                Vec::new()
            }
            Command::Approve {
                holder,
                token,
                spender,
                value,
            } => {
                let spender = spender.unwrap_or_else(|| self.shop.address());
                vec![
                    self.shop
                        .tokens()
                        .approve(token, holder, spender, value)
                        .await?
                        .into(),
                ]
            }
            Command::Transfer {
                from,
                to,
                token,
                value,
            } => vec![
                self.shop
                    .tokens()
                    .transfer(token, from, to, value)
                    .await?
                    .into(),
            ],
            Command::AddProduct {
                caller,
                id,
                name,
                stock,
            } => vec![self.shop.add_product(caller, id, &name, stock).await?.into()],
            Command::SetPrice {
                caller,
                id,
                token,
                price,
            } => vec![self.shop.set_price(caller, id, token, price).await?.into()],
            Command::Buy {
                buyer,
                id,
                token,
                amount,
            } => vec![
                self.shop
                    .buy_with_tokens(buyer, amount, token, id)
                    .await?
                    .into(),
            ],
        };

        for event in &events {
            info!(?event, "event emitted");
        }
        Ok(events)
    }

    /// Consumes the processor and returns the final product listing.
    pub async fn into_results(self) -> Result<Vec<Product>> {
        self.shop.all_products().await
    }
}
