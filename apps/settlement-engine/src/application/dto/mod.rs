//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod portfolio_dto;
mod share_rate_dto;
mod trade_dto;

pub use portfolio_dto::{PortfolioDto, PositionDto};
pub use share_rate_dto::ShareRateDto;
pub use trade_dto::{FieldError, TradeDto, TradeRequest, TradeRequestDto, ValidationErrors};
