use super::address::Address;
use super::amount::Amount;
use serde::{Deserialize, Serialize};

/// Events emitted by successful shop calls.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShopEvent {
    ProductAdded { id: u64, name: String, stock: u64 },
    PriceSet { id: u64, token: Address, price: Amount },
    Purchased { id: u64, buyer: Address, token: Address },
}

/// Events emitted by the token ledger.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        value: Amount,
    },
    Approval {
        token: Address,
        owner: Address,
        spender: Address,
        value: Amount,
    },
}

/// Any event the command processor reports.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(untagged)]
pub enum Event {
    Shop(ShopEvent),
    Token(TokenEvent),
}

impl From<ShopEvent> for Event {
    fn from(event: ShopEvent) -> Self {
        Event::Shop(event)
    }
}

impl From<TokenEvent> for Event {
    fn from(event: TokenEvent) -> Self {
        Event::Token(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_with_tag() {
        let event = Event::from(ShopEvent::Purchased {
            id: 0,
            buyer: Address::from_low_u64(2),
            token: Address::from_low_u64(1),
        });
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "purchased");
        assert_eq!(json["id"], 0);
        assert_eq!(json["buyer"], "0x0000000000000000000000000000000000000002");
    }

    #[test]
    fn test_price_serializes_as_string() {
        let event = ShopEvent::PriceSet {
            id: 0,
            token: Address::from_low_u64(1),
            price: Amount::from(50),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "price_set");
        assert_eq!(json["price"], "50");
    }
}
