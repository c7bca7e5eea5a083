//! Folding action batches into projects.
//!
//! [`apply_actions`] is the only way a project changes. Each action is a
//! pure step from one accumulator value to the next; actions whose
//! precondition does not hold (deleting a missing system, creating a
//! duplicate connection) are skipped silently, and nothing is rolled back.
//!
//! [`undo_actions`] applies the inverted batch in reverse, so
//! `undo_actions(&apply_actions(p, b), b) == *p` whenever every action in
//! `b` was applicable.

use crate::action::{invert_batch, Action};
use crate::project::Project;

/// Apply `actions` left to right and return the resulting project.
pub fn apply_actions(project: &Project, actions: &[Action]) -> Project {
    actions
        .iter()
        .fold(project.clone(), |acc, action| apply_action(acc, action))
}

/// Revert a batch previously passed to [`apply_actions`].
pub fn undo_actions(project: &Project, actions: &[Action]) -> Project {
    apply_actions(project, &invert_batch(actions))
}

fn apply_action(mut project: Project, action: &Action) -> Project {
    match action {
        Action::SetCanvas { new_value, .. } => project.set_canvas(new_value.clone()),
        Action::CreateSolarSystem { solar_system } => project.insert_solar_system(*solar_system),
        Action::DeleteSolarSystem { solar_system } => project.remove_solar_system(solar_system.id),
        Action::UpdateSolarSystem { new_value, .. } => project.replace_solar_system(*new_value),
        Action::CreateHyperlane { connection } => {
            project.hyperlanes_mut().insert(*connection);
        }
        Action::DeleteHyperlane { connection } => {
            project.hyperlanes_mut().remove(connection);
        }
        Action::CreateWormhole { connection } => {
            project.wormholes_mut().insert(*connection);
        }
        Action::DeleteWormhole { connection } => {
            project.wormholes_mut().remove(connection);
        }
        Action::CreateNebula { nebula } => project.insert_nebula(*nebula),
        Action::DeleteNebula { nebula } => project.remove_nebula(nebula),
    }
    project
}
