//! Token models, the token acquisition seam, and the caching token provider.

pub mod clock;
pub mod provider;
pub mod secret;
pub mod source;
pub mod token;

pub use clock::*;
pub use provider::*;
pub use secret::*;
pub use source::*;
pub use token::*;
