pub mod codec;
pub mod convert;
pub mod node;
pub mod registry;

pub use crate::domain::model::{Message, Outcome, Payload, Record, Row};
pub use crate::domain::ports::{Node, NodeHost};
pub use crate::utils::error::Result;
