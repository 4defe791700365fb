pub mod types;
pub mod error;
pub mod config;
pub mod board;
pub mod ledger;
pub mod dice;
pub mod cards;
pub mod decision;
pub mod visibility;
pub mod landing;
pub mod auction;
pub mod trade;
pub mod engine;
pub mod setup;
pub mod snapshot;


pub use types::*;
pub use error::EngineError;
pub use config::{GameConfig, TurnMode};
pub use decision::{Agents, Bids, CashDirection, DecisionMaker, TradeOffer};
pub use visibility::PlayerView;
pub use engine::{play_turn, Roll};
