//! Trade DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{PortfolioId, Quantity, Symbol};
use crate::domain::trade_settlement::{Trade, TradeAction};

/// Raw trade request as received from a client.
///
/// Every field is optional so that missing fields are reported by
/// [`validate`](Self::validate) alongside other field errors rather than by
/// the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequestDto {
    /// Portfolio to settle against.
    pub portfolio_id: Option<i64>,
    /// Share symbol.
    pub symbol: Option<String>,
    /// `BUY` or `SELL`, any case.
    pub action: Option<String>,
    /// Number of shares.
    #[serde(alias = "quantity")]
    pub no_of_shares: Option<i64>,
}

/// A trade request that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    /// Portfolio to settle against.
    pub portfolio_id: PortfolioId,
    /// Share symbol.
    pub symbol: Symbol,
    /// Trade direction.
    pub action: TradeAction,
    /// Number of shares.
    pub quantity: Quantity,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

/// Outcome of structural validation of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// Field errors, in field order.
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// True when no field failed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl TradeRequestDto {
    /// Validate the request, converting it to domain types.
    ///
    /// All fields are checked; every failure is reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors if any field is missing or invalid.
    pub fn validate(&self) -> Result<TradeRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let portfolio_id = match self.portfolio_id {
            None => {
                errors.push("portfolioId", "is required");
                None
            }
            Some(raw) => match i32::try_from(raw) {
                Ok(id) => Some(PortfolioId::new(id)),
                Err(_) => {
                    errors.push("portfolioId", "is out of range");
                    None
                }
            },
        };

        let symbol = match self.symbol.as_deref() {
            None => {
                errors.push("symbol", "is required");
                None
            }
            Some(raw) => {
                let symbol = Symbol::new(raw);
                match symbol.validate() {
                    Ok(()) => Some(symbol),
                    Err(e) => {
                        errors.push("symbol", domain_message(&e));
                        None
                    }
                }
            }
        };

        let action = match self.action.as_deref() {
            None => {
                errors.push("action", "is required");
                None
            }
            Some(raw) => match raw.parse::<TradeAction>() {
                Ok(action) => Some(action),
                Err(e) => {
                    errors.push("action", domain_message(&e));
                    None
                }
            },
        };

        let quantity = match self.no_of_shares {
            None => {
                errors.push("noOfShares", "is required");
                None
            }
            Some(raw) => match Quantity::from_i64(raw) {
                Ok(quantity) => Some(quantity),
                Err(e) => {
                    errors.push("noOfShares", domain_message(&e));
                    None
                }
            },
        };

        match (portfolio_id, symbol, action, quantity) {
            (Some(portfolio_id), Some(symbol), Some(action), Some(quantity))
                if errors.is_valid() =>
            {
                Ok(TradeRequest {
                    portfolio_id,
                    symbol,
                    action,
                    quantity,
                })
            }
            _ => Err(errors),
        }
    }
}

fn domain_message(err: &crate::domain::shared::DomainError) -> String {
    err.message().to_string()
}

/// DTO representing a settled trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDto {
    /// Ledger-assigned id.
    pub id: i64,
    /// Portfolio the trade belongs to.
    pub portfolio_id: i32,
    /// Share symbol.
    pub symbol: String,
    /// Trade direction.
    pub action: TradeAction,
    /// Number of shares.
    pub no_of_shares: u32,
    /// Total price (rate × shares).
    pub price: Decimal,
}

impl TradeDto {
    /// Create from domain Trade.
    #[must_use]
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            id: trade.id().value(),
            portfolio_id: trade.portfolio_id().value(),
            symbol: trade.symbol().to_string(),
            action: trade.action(),
            no_of_shares: trade.quantity().shares(),
            price: trade.price().amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn valid_dto() -> TradeRequestDto {
        TradeRequestDto {
            portfolio_id: Some(1),
            symbol: Some("CBI".to_string()),
            action: Some("buy".to_string()),
            no_of_shares: Some(10),
        }
    }

    #[test]
    fn validate_accepts_well_formed_request() {
        let req = valid_dto().validate().unwrap();
        assert_eq!(req.portfolio_id, PortfolioId::new(1));
        assert_eq!(req.symbol.as_str(), "CBI");
        assert_eq!(req.action, TradeAction::Buy);
        assert_eq!(req.quantity.shares(), 10);
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let errors = TradeRequestDto::default().validate().unwrap_err();
        assert!(!errors.is_valid());

        let fields: Vec<&str> = errors.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["portfolioId", "symbol", "action", "noOfShares"]);
    }

    #[test_case(Some(0) ; "zero shares")]
    #[test_case(Some(-5) ; "negative shares")]
    #[test_case(None ; "missing shares")]
    fn validate_rejects_bad_quantity(no_of_shares: Option<i64>) {
        let dto = TradeRequestDto {
            no_of_shares,
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "noOfShares");
    }

    #[test_case("HOLD" ; "unknown action")]
    #[test_case("" ; "empty action")]
    fn validate_rejects_bad_action(action: &str) {
        let dto = TradeRequestDto {
            action: Some(action.to_string()),
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "action");
    }

    #[test]
    fn validate_rejects_blank_symbol() {
        let dto = TradeRequestDto {
            symbol: Some("  ".to_string()),
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "symbol");
        assert!(errors.to_string().contains("symbol"));
    }

    #[test]
    fn validate_accepts_large_orders_and_long_symbols() {
        let dto = TradeRequestDto {
            symbol: Some("ABCDEFGHIJKLMNOPQ".to_string()),
            no_of_shares: Some(2_000_000),
            ..valid_dto()
        };
        let req = dto.validate().unwrap();
        assert_eq!(req.symbol.as_str(), "ABCDEFGHIJKLMNOPQ");
        assert_eq!(req.quantity.shares(), 2_000_000);
    }

    #[test]
    fn validate_keeps_symbol_verbatim() {
        let dto = TradeRequestDto {
            symbol: Some(" CBI ".to_string()),
            ..valid_dto()
        };
        assert_eq!(dto.validate().unwrap().symbol.as_str(), " CBI ");
    }

    #[test]
    fn validate_rejects_out_of_range_portfolio() {
        let dto = TradeRequestDto {
            portfolio_id: Some(i64::from(i32::MAX) + 1),
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "portfolioId");
    }

    #[test]
    fn request_accepts_quantity_alias() {
        let dto: TradeRequestDto = serde_json::from_str(
            r#"{"portfolioId": 1, "symbol": "REL", "action": "SELL", "quantity": 3}"#,
        )
        .unwrap();
        assert_eq!(dto.no_of_shares, Some(3));
        assert_eq!(dto.validate().unwrap().action, TradeAction::Sell);
    }
}
