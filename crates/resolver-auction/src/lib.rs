//! Auction pricing for the resolver system.
//!
//! [`curve`] computes decay rates as pure functions; [`clock`] wraps one
//! auction's timing (activity window, elapsed/remaining time, snapshots).
//! Nothing here performs I/O or holds state.

pub mod clock;
pub mod curve;

pub use clock::{AuctionClock, AuctionSnapshot};
pub use curve::rate_at;
