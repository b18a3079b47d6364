// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod board;
mod candidates;
mod command;
mod conflict;
mod error;
mod pairing;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use board::{MatBoard, apply_mat_ordering, distribute_bouts, move_bout, remove_bout};
pub use candidates::{Candidate, candidates};
pub use command::Command;
pub use conflict::{
    ConflictHistogram, MAX_REORDER_PASSES, MAX_SWAP_ATTEMPTS, auto_reorder_mat, conflict_severity,
};
pub use error::CoreError;
pub use pairing::{PairingOptions, PairingOutcome, UnderTarget, generate_pairings,
    under_target_report};
pub use state::{MeetState, TransitionResult};
