// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// stempel-store: Persistent settings and source-image cache for Stempel.

pub mod cache;
pub mod data_dir;

pub use cache::CacheStore;
