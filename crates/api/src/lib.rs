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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod lock;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error};
pub use handlers::{
    ApiResult, acquire_meet_lock, auto_reorder_mat, create_bout, create_meet, create_team,
    delete_bout, generate_pairings, get_mat_board, login, logout, move_bout, publish_meet,
    register_wrestler, release_meet_lock, save_mat_ordering, set_attendance, suggest_candidates,
};
pub use lock::{LockError, MeetLockService};
pub use request_response::{
    AcquireLockResponse, AutoReorderRequest, AutoReorderResponse, BoutInfo, CandidateInfo,
    CreateBoutRequest, CreateBoutResponse, CreateMeetRequest, CreateMeetResponse,
    CreateTeamRequest, CreateTeamResponse, DeleteBoutResponse, GeneratePairingsRequest,
    GeneratePairingsResponse, LoginRequest, LoginResponse, MatBoardView, MatView,
    MoveBoutRequest, MoveBoutResponse, PublishMeetResponse, RegisterWrestlerRequest,
    RegisterWrestlerResponse, ReleaseLockResponse, SaveMatOrderingRequest,
    SaveMatOrderingResponse, SetAttendanceRequest, SetAttendanceResponse,
    SuggestCandidatesResponse, UnderTargetInfo, WhoAmIResponse,
};
