pub mod bridge;
pub mod error;

pub use bridge::{Bridge, BridgeEvent, PowerLevel};
pub use error::BridgeError;
