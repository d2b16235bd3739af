//! # Crashrecon — crash-report reconstruction search
//!
//! Reconstructs real-world vehicle-crash reports as simulated driving
//! scenarios and searches for trajectory/speed parameters whose simulated
//! outcome best matches the damage pattern in the original police report.
//!
//! ## Engine overview
//!
//! One search epoch flows through four stages:
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Mutate | [`transform`], [`mutator`], [`sampler`] | Deep-clone the scenario, perturb vehicle speeds and trajectory origins under road-geometry constraints |
//! | Execute | [`executor`] | Hand the candidate to the external simulator boundary, get per-vehicle damage back |
//! | Score | [`report`] | Decode damage into the category-D part taxonomy and match it two-sidedly against the police report |
//! | Compare | [`stats`] | Vargha–Delaney A and a two-sample significance test across repeated-trial score distributions |
//!
//! [`search`] drives the loop (random search and one-plus-one hill climbing)
//! and [`config`] turns declarative JSON mutator specs into validated
//! operators.
//!
//! ## Discipline
//!
//! - **Clone-then-mutate**: every mutation entry point deep-copies the
//!   scenario graph first; a baseline scenario is reusable across any number
//!   of trials.
//! - **Bounded retries**: the only potentially unbounded operation — finding
//!   a displaced origin inside a road polygon — carries an explicit round
//!   ceiling and fails loudly when it runs out.
//! - **No silent defaults**: malformed configuration, exhausted geometry and
//!   malformed simulator output all fail fast at their component boundary;
//!   a swallowed failure would corrupt the statistics layer.
//!
//! The crate is single-threaded and synchronous by design: one scenario
//! evaluation at a time. Independent trials can still run in parallel
//! processes, since nothing here holds process-wide mutable state.

pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod geometry;
pub mod mutator;
pub mod report;
pub mod sampler;
pub mod scenario;
pub mod search;
pub mod stats;
pub mod transform;
