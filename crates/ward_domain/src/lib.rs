mod consent;
mod environment;
mod error;
mod operation;
mod preview;

pub use consent::*;
pub use environment::*;
pub use error::*;
pub use operation::*;
pub use preview::*;
