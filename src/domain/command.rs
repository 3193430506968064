use super::address::Address;
use super::amount::Amount;
use crate::error::ShopError;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    DeployToken,
    Approve,
    Transfer,
    AddProduct,
    SetPrice,
    Buy,
}

/// One row of the command file. Which columns are required depends on `command`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub command: CommandKind,
    pub caller: Address,
    pub product: Option<u64>,
    pub name: Option<String>,
    pub stock: Option<u64>,
    pub token: Option<Address>,
    /// Kept as text so no precision is lost before [`parse_amount`] sees it.
    pub amount: Option<String>,
    pub account: Option<Address>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// A validated command, ready for the processor.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    DeployToken {
        creator: Address,
        token: Address,
        name: String,
        symbol: String,
        supply: Amount,
    },
    /// `spender` of `None` means the shop itself.
    Approve {
        holder: Address,
        token: Address,
        spender: Option<Address>,
        value: Amount,
    },
    Transfer {
        from: Address,
        to: Address,
        token: Address,
        value: Amount,
    },
    AddProduct {
        caller: Address,
        id: u64,
        name: String,
        stock: u64,
    },
    SetPrice {
        caller: Address,
        id: u64,
        token: Address,
        price: Amount,
    },
    Buy {
        buyer: Address,
        id: u64,
        token: Address,
        amount: Amount,
    },
}

fn required<T>(value: Option<T>, command: CommandKind, column: &str) -> Result<T, ShopError> {
    value.ok_or_else(|| {
        ShopError::ValidationError(format!("{command:?} requires the `{column}` column"))
    })
}

fn non_empty(value: Option<String>, command: CommandKind, column: &str) -> Result<String, ShopError> {
    required(value.filter(|s| !s.is_empty()), command, column)
}

/// Parses a decimal amount exactly, rejecting anything that would need rounding.
fn parse_amount(text: &str) -> Result<Amount, ShopError> {
    let value = Decimal::from_str_exact(text)
        .map_err(|e| ShopError::ValidationError(format!("invalid amount {text:?}: {e}")))?;
    Amount::new(value)
}

impl TryFrom<CommandRecord> for Command {
    type Error = ShopError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        let kind = record.command;
        let amount = |column: &str| -> Result<Amount, ShopError> {
            parse_amount(required(record.amount.as_deref(), kind, column)?)
        };

        let command = match kind {
            CommandKind::DeployToken => {
                let name = non_empty(record.name.clone(), kind, "name")?;
                let symbol = record
                    .symbol
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| name.clone());
                Command::DeployToken {
                    creator: record.caller,
                    token: required(record.token, kind, "token")?,
                    name,
                    symbol,
                    supply: amount("amount")?,
                }
            }
            CommandKind::Approve => Command::Approve {
                holder: record.caller,
                token: required(record.token, kind, "token")?,
                spender: record.account,
                value: amount("amount")?,
            },
            CommandKind::Transfer => Command::Transfer {
                from: record.caller,
                to: required(record.account, kind, "account")?,
                token: required(record.token, kind, "token")?,
                value: amount("amount")?,
            },
            CommandKind::AddProduct => Command::AddProduct {
                caller: record.caller,
                id: required(record.product, kind, "product")?,
                name: non_empty(record.name.clone(), kind, "name")?,
                stock: required(record.stock, kind, "stock")?,
            },
            CommandKind::SetPrice => Command::SetPrice {
                caller: record.caller,
                id: required(record.product, kind, "product")?,
                token: required(record.token, kind, "token")?,
                price: amount("amount")?,
            },
            CommandKind::Buy => Command::Buy {
                buyer: record.caller,
                id: required(record.product, kind, "product")?,
                token: required(record.token, kind, "token")?,
                amount: amount("amount")?,
            },
        };
        Ok(command)
    }
}
