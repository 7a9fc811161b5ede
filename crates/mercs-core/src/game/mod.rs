mod collection;
mod enums;
mod visitor;

pub use collection::*;
pub use enums::*;
pub use visitor::*;

pub(crate) use visitor::null_as_empty;
