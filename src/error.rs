use crate::domain::address::Address;
use crate::domain::amount::Amount;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShopError>;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("caller {caller} is not the shop owner")]
    NotOwner { caller: Address },
    #[error("product {0} is already listed")]
    AlreadyListed(u64),
    #[error("product {0} is not listed")]
    NotListed(u64),
    #[error("product {0} is out of stock")]
    OutOfStock(u64),
    #[error("product {id} has no price set for token {token}")]
    PriceNotSet { id: u64, token: Address },
    #[error("amount {supplied} does not match price {expected}")]
    PriceMismatch { expected: Amount, supplied: Amount },
    #[error("unknown token {0}")]
    UnknownToken(Address),
    #[error("token {0} already exists")]
    TokenExists(Address),
    #[error("{holder} has balance {available}, needs {requested}")]
    InsufficientBalance {
        holder: Address,
        available: Amount,
        requested: Amount,
    },
    #[error("{spender} may spend {available} of {holder}'s tokens, needs {requested}")]
    InsufficientAllowance {
        holder: Address,
        spender: Address,
        available: Amount,
        requested: Amount,
    },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for ShopError {
    fn from(err: rocksdb::Error) -> Self {
        ShopError::InternalError(Box::new(err))
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        ShopError::InternalError(Box::new(err))
    }
}
