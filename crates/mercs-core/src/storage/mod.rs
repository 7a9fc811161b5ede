//! Persistent storage.
//!
//! - **Preferences**: the user's preference document, which carries the
//!   persisted visitor progress
//! - **Collection cache**: last good collection snapshot, used when the
//!   memory plugin has nothing to report

mod collection_cache;
mod preferences;
#[cfg(test)]
pub(crate) mod test_support;

pub use collection_cache::*;
pub use preferences::*;
