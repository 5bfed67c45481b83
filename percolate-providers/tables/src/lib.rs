//! Table provider that assembles a [`percolate_core::RoadGraph`] from a
//! delimited node table and a delimited edge table.

mod errors;
mod loader;
mod parse;

pub use errors::{TableError, TableKind};
pub use loader::{DEFAULT_DELIMITER, TableGraphLoader};
pub use parse::parse_cell;

#[cfg(test)]
mod tests;
