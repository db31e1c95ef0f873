//! Interactive terminal tutorial that teaches git through practice drills.
//!
//! The learner types real commands; the engine classifies each answer,
//! executes git against a practice directory, and keeps score. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (answer classification,
//!   challenge descriptors, session state, menu parsing). No I/O, fully
//!   testable in isolation.
//! - **[`io`]**: Side-effecting operations (process execution, terminal
//!   input, fixture files). Isolated behind seams to enable scripted doubles
//!   in tests.
//!
//! Orchestration modules ([`step`], [`lessons`], [`scenarios`]) coordinate
//! core logic with I/O to drive the tutorial.

pub mod config;
pub mod core;
pub mod io;
pub mod lessons;
pub mod logging;
pub mod scenarios;
pub mod step;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
