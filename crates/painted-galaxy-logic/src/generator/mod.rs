//! The four galaxy generators.
//!
//! Each generator reads a [`Project`] (and, for placement, a decoded
//! [`PixelGrid`](crate::density::PixelGrid)), draws from the supplied RNG,
//! and returns an action batch. None of them modify the project; the caller
//! applies the batch and records it for undo.
//!
//! | Generator | Output |
//! |-----------|--------|
//! | [`generate_solar_systems`] | clears the map, then one create per placed system |
//! | [`generate_hyperlanes`] | replaces all hyperlanes |
//! | [`generate_spawns`] | spawn-flag updates |
//! | [`generate_nebulas`] | replaces all nebulas |

mod hyperlanes;
mod nebulas;
mod placement;
mod spawns;

pub use hyperlanes::generate_hyperlanes;
pub use nebulas::{generate_nebulas, generate_nebulas_with};
pub use placement::generate_solar_systems;
pub use spawns::{dead_ends, generate_spawns, target_spawn_count};

use crate::action::Action;
use crate::project::Project;

fn delete_solar_systems(project: &Project) -> impl Iterator<Item = Action> + '_ {
    project
        .solar_systems()
        .iter()
        .map(|&solar_system| Action::DeleteSolarSystem { solar_system })
}

fn delete_hyperlanes(project: &Project) -> impl Iterator<Item = Action> + '_ {
    project
        .hyperlanes()
        .iter()
        .map(|&connection| Action::DeleteHyperlane { connection })
}

fn delete_wormholes(project: &Project) -> impl Iterator<Item = Action> + '_ {
    project
        .wormholes()
        .iter()
        .map(|&connection| Action::DeleteWormhole { connection })
}

fn delete_nebulas(project: &Project) -> impl Iterator<Item = Action> + '_ {
    project
        .nebulas()
        .iter()
        .map(|&nebula| Action::DeleteNebula { nebula })
}
