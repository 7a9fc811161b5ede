//! Bridge to the external memory-reading plugin.
//!
//! The plugin itself is not part of this crate; it publishes the current
//! scene and the Mercenaries collection snapshot, which are consumed here.

mod snapshot;

pub use snapshot::*;
