use super::address::Address;
use super::amount::Amount;
use crate::error::ShopError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub const DEFAULT_DECIMALS: u8 = 18;

    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: Self::DEFAULT_DECIMALS,
        }
    }
}

/// Balance and allowance book of one fungible token.
///
/// Every mutating method either applies fully or leaves the book untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBook {
    pub address: Address,
    pub metadata: TokenMetadata,
    pub total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenBook {
    /// Mints the whole `initial_supply` to `creator`.
    pub fn new(
        address: Address,
        creator: Address,
        metadata: TokenMetadata,
        initial_supply: Amount,
    ) -> Self {
        let mut balances = HashMap::new();
        balances.insert(creator, initial_supply);
        Self {
            address,
            metadata,
            total_supply: initial_supply,
            balances,
            allowances: HashMap::new(),
        }
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    pub fn allowance(&self, holder: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*holder, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Sets the allowance of `spender` over `holder`'s tokens, replacing any previous value.
    pub fn approve(&mut self, holder: Address, spender: Address, value: Amount) {
        self.allowances.insert((holder, spender), value);
    }

    pub fn transfer(&mut self, from: Address, to: Address, value: Amount) -> Result<(), ShopError> {
        let available = self.balance_of(&from);
        let remaining = available
            .checked_sub(value)
            .ok_or(ShopError::InsufficientBalance {
                holder: from,
                available,
                requested: value,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(&to)
            .checked_add(value)
            .ok_or_else(|| ShopError::ValidationError("balance overflow".to_string()))?;

        self.balances.insert(from, remaining);
        self.balances.insert(to, credited);
        Ok(())
    }

    /// Moves `value` from `from` to `to` on behalf of `spender`, consuming allowance.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<(), ShopError> {
        let allowed = self.allowance(&from, &spender);
        let left = allowed
            .checked_sub(value)
            .ok_or(ShopError::InsufficientAllowance {
                holder: from,
                spender,
                available: allowed,
                requested: value,
            })?;

        self.transfer(from, to, value)?;
        self.allowances.insert((from, spender), left);
        Ok(())
    }
}
