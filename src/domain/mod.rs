//! Domain modules organized as vertical slices.
//!
//! - `market`: `mod.rs` types, `wire.rs` provider records, `convert.rs`
//!   validation, `state.rs` containers, `client.rs` HTTP-backed source,
//!   `poller.rs` the timer-driven controller
//! - `history`: `mod.rs` types, `table.rs` static series, `state.rs`
//!   containers, `selector.rs` the selection controller

pub mod history;
pub mod market;
