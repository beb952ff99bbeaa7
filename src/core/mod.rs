pub mod client;
pub mod query;
pub mod tires;

pub use crate::domain::model::{Envelope, Item, MutationResult};
pub use crate::domain::ports::{ConfigProvider, ContentApi};
pub use crate::utils::error::Result;
