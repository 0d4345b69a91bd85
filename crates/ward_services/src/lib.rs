mod consent;
mod infra;
mod tool_services;
mod utils;

#[cfg(test)]
mod test_support;

pub use consent::*;
pub use infra::*;
pub use tool_services::*;
