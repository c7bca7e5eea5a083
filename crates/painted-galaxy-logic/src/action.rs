//! Reversible edits over a [`Project`](crate::project::Project).
//!
//! Every variant carries exactly what it needs to be applied and undone.
//! [`Action::invert`] produces the edit that cancels it; inverting twice
//! gives back the original action.
//!
//! ```
//! use painted_galaxy_logic::action::Action;
//! use painted_galaxy_logic::coordinate::Coordinate;
//! use painted_galaxy_logic::solar_system::{SolarSystem, SolarSystemId};
//!
//! let s = SolarSystem::new(SolarSystemId(0), Coordinate::new(4.0, 2.0));
//! let create = Action::CreateSolarSystem { solar_system: s };
//! assert_eq!(create.invert(), Action::DeleteSolarSystem { solar_system: s });
//! assert_eq!(create.invert().invert(), create);
//! ```

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::nebula::Nebula;
use crate::project::Canvas;
use crate::solar_system::SolarSystem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetCanvas { old_value: Canvas, new_value: Canvas },
    CreateSolarSystem { solar_system: SolarSystem },
    DeleteSolarSystem { solar_system: SolarSystem },
    UpdateSolarSystem { old_value: SolarSystem, new_value: SolarSystem },
    CreateHyperlane { connection: Connection },
    DeleteHyperlane { connection: Connection },
    CreateWormhole { connection: Connection },
    DeleteWormhole { connection: Connection },
    CreateNebula { nebula: Nebula },
    DeleteNebula { nebula: Nebula },
}

impl Action {
    /// The action that exactly undoes this one.
    pub fn invert(&self) -> Action {
        match self {
            Action::SetCanvas {
                old_value,
                new_value,
            } => Action::SetCanvas {
                old_value: new_value.clone(),
                new_value: old_value.clone(),
            },
            Action::CreateSolarSystem { solar_system } => Action::DeleteSolarSystem {
                solar_system: *solar_system,
            },
            Action::DeleteSolarSystem { solar_system } => Action::CreateSolarSystem {
                solar_system: *solar_system,
            },
            Action::UpdateSolarSystem {
                old_value,
                new_value,
            } => Action::UpdateSolarSystem {
                old_value: *new_value,
                new_value: *old_value,
            },
            Action::CreateHyperlane { connection } => Action::DeleteHyperlane {
                connection: *connection,
            },
            Action::DeleteHyperlane { connection } => Action::CreateHyperlane {
                connection: *connection,
            },
            Action::CreateWormhole { connection } => Action::DeleteWormhole {
                connection: *connection,
            },
            Action::DeleteWormhole { connection } => Action::CreateWormhole {
                connection: *connection,
            },
            Action::CreateNebula { nebula } => Action::DeleteNebula { nebula: *nebula },
            Action::DeleteNebula { nebula } => Action::CreateNebula { nebula: *nebula },
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetCanvas { .. } => "set_canvas",
            Action::CreateSolarSystem { .. } => "create_solar_system",
            Action::DeleteSolarSystem { .. } => "delete_solar_system",
            Action::UpdateSolarSystem { .. } => "update_solar_system",
            Action::CreateHyperlane { .. } => "create_hyperlane",
            Action::DeleteHyperlane { .. } => "delete_hyperlane",
            Action::CreateWormhole { .. } => "create_wormhole",
            Action::DeleteWormhole { .. } => "delete_wormhole",
            Action::CreateNebula { .. } => "create_nebula",
            Action::DeleteNebula { .. } => "delete_nebula",
        }
    }
}

/// Invert a whole batch: each action inverted, in reverse order.
pub fn invert_batch(actions: &[Action]) -> Vec<Action> {
    actions.iter().rev().map(Action::invert).collect()
}
