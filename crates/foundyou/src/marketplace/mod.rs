//! FoundYou marketplace: talent listings, the search page, onboarding and account forms, and
//! the HTTP routes that expose them.

pub mod forms;
pub mod router;
pub mod search;
pub mod site;
pub mod talent;

#[cfg(test)]
mod tests;

pub use router::{marketplace_router, Marketplace};
