// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query functions.
//!
//! All queries use Diesel DSL against a `SqliteConnection` and return row
//! structs from `data_models`; domain conversion happens at the
//! `SqlitePersistence` boundary.

pub mod audit;
pub mod bouts;
pub mod locks;
pub mod meets;
pub mod operators;
pub mod roster;
