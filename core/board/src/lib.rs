pub mod codec;
pub mod domain;
pub mod ecs_logic;
pub mod engine;
pub mod error;
pub mod loader;
pub mod loader_schema;
pub mod logic;
pub mod session;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use domain::{alias, constants};
