//! Trade Settlement Value Objects

mod net_position;
mod position_key;
mod share_rate;
mod trade_action;

pub use net_position::NetPosition;
pub use position_key::PositionKey;
pub use share_rate::ShareRate;
pub use trade_action::TradeAction;
