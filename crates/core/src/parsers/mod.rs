pub mod date;
pub mod fields;
pub mod lax;
pub mod registry;
pub mod strict;
pub mod traits;

mod tokens;
