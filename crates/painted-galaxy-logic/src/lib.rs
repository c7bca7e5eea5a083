//! Pure galaxy-map logic for Painted Galaxy.
//!
//! This crate contains the map model and every algorithm that works on it,
//! independent of image decoding, storage or any UI. Functions take plain
//! data (and an injected RNG where randomness is involved) and return
//! results, so everything here is unit-testable and deterministic under a
//! fixed seed.
//!
//! Every edit to a [`project::Project`] is an [`action::Action`]. Generators
//! return action batches, the [`applier`] folds them into a new project, and
//! undoing a batch is applying its inverse.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`action`] | The ten reversible edits and their inverses |
//! | [`applier`] | Apply / undo an action batch against a project |
//! | [`connection`] | Orientation-free system pairs (hyperlanes, wormholes) |
//! | [`constants`] | Canvas size, spawn scaling, random nebula parameters |
//! | [`coordinate`] | Canvas-space points, distance, export-space transform |
//! | [`density`] | Painted pixels → incremental weighted sampling grid |
//! | [`error`] | Model construction errors |
//! | [`generator`] | System placement, hyperlanes, spawns, nebulas |
//! | [`graph`] | Kruskal MST, adjacency, multi-source BFS |
//! | [`nebula`] | Circular nebulas with positive radius |
//! | [`project`] | The immutable map value |
//! | [`scenario`] | Static galaxy scenario text export |
//! | [`settings`] | Generator configuration with serde defaults |
//! | [`solar_system`] | Systems, ids and spawn flags |
//! | [`triangulation`] | Bowyer–Watson Delaunay triangulation |

pub mod action;
pub mod applier;
pub mod connection;
pub mod constants;
pub mod coordinate;
pub mod density;
pub mod error;
pub mod generator;
pub mod graph;
pub mod nebula;
pub mod project;
pub mod scenario;
pub mod settings;
pub mod solar_system;
pub mod triangulation;
