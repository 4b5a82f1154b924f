//! Domain inputs with validation at construction
//!
//! All client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod stream;
pub mod validation;

pub use stream::{StreamDescription, StreamTitle};
pub use validation::ValidationError;
