// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer - bridges the front end to the stempel backend crates.
//
// The front end calls plain synchronous methods and renders from the state
// they return; no event-loop types cross this boundary.

pub mod signing;
