// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mat_board_domain::{AttendanceStatus, MatNumber};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Everything a command
/// needs is carried in its fields — including the seed for randomized
/// reordering — so [`crate::apply`] is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate (or augment) the full bout slate for the meet and
    /// distribute new bouts across mats.
    GeneratePairings {
        /// Discard the current bout set before generating. When false,
        /// existing bouts and their mat/order assignments are retained
        /// and only new bouts are added.
        clear_existing: bool,
    },
    /// Create a single bout from an accepted candidate suggestion.
    CreateBout {
        /// The wrestler in red.
        red_id: i64,
        /// The wrestler in green.
        green_id: i64,
    },
    /// Delete a single bout, closing the gap in its mat's running order.
    DeleteBout {
        /// The bout to delete.
        bout_id: i64,
    },
    /// Move a bout to a position on a mat (manual drag).
    MoveBout {
        /// The bout to move.
        bout_id: i64,
        /// The destination mat.
        mat: MatNumber,
        /// The 0-based insertion index, clamped to the destination list.
        index: u32,
    },
    /// Replace the full mat → ordered-bout-list mapping (the canonical
    /// save format; never a diff).
    SaveMatOrdering {
        /// Per-mat ordered bout ids. Bouts not listed anywhere become
        /// unassigned.
        ordering: Vec<(MatNumber, Vec<i64>)>,
    },
    /// Run the conflict optimizer over one mat's running order.
    AutoReorderMat {
        /// The mat to reorder.
        mat: MatNumber,
        /// Seed for the randomized swap selection. Same seed, same result.
        seed: u64,
    },
    /// Record a wrestler's attendance status for the meet.
    SetAttendance {
        /// The wrestler.
        wrestler_id: i64,
        /// The new status.
        status: AttendanceStatus,
    },
    /// Publish the meet, freezing bouts and mat assignments.
    PublishMeet,
}
