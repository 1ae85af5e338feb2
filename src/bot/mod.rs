//! Bot core - routes inbound commands to handlers and formats replies.

pub mod delivery;
pub mod engine;
pub mod event;
pub mod format;
pub mod geo;
pub mod joke;
pub mod news;
pub mod openai;
pub mod router;
pub mod weather;


pub use delivery::{Delivery, TelegramDelivery};
pub use engine::Engine;
pub use event::InboundEvent;
