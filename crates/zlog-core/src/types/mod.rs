//! Core data types: levels, module identifiers, records and the network
//! value objects.

pub mod enums;
pub mod module;
pub mod network;
pub mod record;

pub use enums::*;
pub use module::*;
pub use network::*;
pub use record::*;
