//! Weighted random placement of solar systems on the painted density map.

use log::{debug, warn};
use rand::Rng;

use super::{delete_hyperlanes, delete_solar_systems, delete_wormholes};
use crate::action::Action;
use crate::coordinate::Coordinate;
use crate::density::{PixelGrid, WeightGrid};
use crate::project::Project;
use crate::solar_system::{SolarSystem, SolarSystemId};

/// Replace every system on the map with `number_of_systems` new ones.
///
/// Each system lands on a pixel drawn with probability proportional to its
/// painted weight, after which every pixel within
/// `min_distance_between_systems` is taken out of the draw. When the
/// remaining weight runs out, fewer systems are created; that is not an
/// error and the returned batch is authoritative.
///
/// The batch deletes all hyperlanes, wormholes and systems before the
/// creates. New ids are `0..n` in creation order.
pub fn generate_solar_systems(
    project: &Project,
    pixels: &PixelGrid,
    rng: &mut impl Rng,
) -> Vec<Action> {
    let settings = project.generator_settings();
    let mut grid = WeightGrid::from_pixels(pixels);
    let mut created = Vec::with_capacity(settings.number_of_systems as usize);

    for i in 0..settings.number_of_systems {
        if grid.total() == 0 {
            warn!(
                "Generated {} solar systems; no more valid locations",
                created.len()
            );
            break;
        }
        let target = rng.gen_range(0..grid.total());
        let Some((x, y)) = grid.locate(target) else {
            break;
        };
        created.push(Action::CreateSolarSystem {
            solar_system: SolarSystem::new(SolarSystemId(i), Coordinate::new(x as f64, y as f64)),
        });
        grid.zero_out_disc(x, y, settings.min_distance_between_systems);
    }

    debug!(
        "placement: {} of {} systems, {} weight left",
        created.len(),
        settings.number_of_systems,
        grid.total()
    );

    delete_hyperlanes(project)
        .chain(delete_wormholes(project))
        .chain(delete_solar_systems(project))
        .chain(created)
        .collect()
}
