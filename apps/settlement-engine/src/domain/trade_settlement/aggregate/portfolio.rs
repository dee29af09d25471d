//! Portfolio entity.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, PortfolioId};

/// A registered portfolio that trades are settled against.
///
/// The engine only needs to know whether a portfolio exists. Its trades live
/// in the ledger and are joined in when a portfolio is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    id: PortfolioId,
    name: String,
}

impl Portfolio {
    /// Create a portfolio.
    ///
    /// # Errors
    ///
    /// Returns error if the name is blank.
    pub fn new(id: PortfolioId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidValue {
                field: "name".to_string(),
                message: "Portfolio name cannot be empty".to_string(),
            });
        }
        Ok(Self { id, name })
    }

    /// Get the portfolio ID.
    #[must_use]
    pub const fn id(&self) -> PortfolioId {
        self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
