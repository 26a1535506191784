//! Host-facing data types: declarations in, changes out.

mod cell;
mod change;
mod id;
mod row;
mod selection;
mod style;

pub use cell::*;
pub use change::*;
pub use id::*;
pub use row::*;
pub use selection::*;
pub use style::*;
