//! Shared types for the Dutch auction resolver system.
//!
//! Defines the order/fill data model, the error taxonomy, engine events,
//! and the abstract interfaces of external collaborators (ledger executor,
//! market-rate oracle, liquidity source, order discovery).

pub mod common;
pub mod delivery;
pub mod discovery;
pub mod errors;
pub mod events;
pub mod liquidity;
pub mod oracles;
pub mod order;
pub mod resolver;

pub use common::*;
pub use delivery::*;
pub use discovery::*;
pub use errors::*;
pub use events::*;
pub use liquidity::*;
pub use oracles::*;
pub use order::*;
pub use resolver::*;
