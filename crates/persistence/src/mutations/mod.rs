// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! All mutations use Diesel DSL; the one `SQLite`-specific helper is
//! `last_insert_rowid()` from the `sqlite` module. Multi-row writes that
//! must be atomic (bout-set replacement, mat-order saves) run inside
//! `conn.transaction`.

pub mod audit;
pub mod bouts;
pub mod locks;
pub mod meets;
pub mod operators;
pub mod roster;
