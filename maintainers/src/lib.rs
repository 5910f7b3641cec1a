//! Maintainer identity resolution and significance aggregation
//!
//! # Overview
//!
//! Package registries, commit histories and issue trackers each describe the
//! people behind a package in their own partial way: a registry knows a
//! login, a commit only an author name and email, an issue another login.
//! This crate resolves those partial observations into one maintainer roster
//! per package and counts, across a whole corpus of critical packages, how
//! many of them each resolved person maintains.
//!
//! Resolution is heuristic by design. Two observations denote the same
//! person when any one identity field matches exactly ([`identity`]); merged
//! records keep the first-seen value per field. Committers count as
//! maintainers once their cumulative share of a repository's commits reaches
//! a threshold ([`selector`]); issue authors always count. [`fuse`] builds
//! the per-package roster, [`aggregate`] the corpus-wide counts. The
//! [`census`] engine (feature `engine`) wires those over a [`api::Client`]
//! implementation.

pub mod aggregate;
#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "engine")]
pub mod census;
pub mod fuse;
pub mod identity;
pub mod selector;
