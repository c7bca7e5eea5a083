//! Random nebula scattering over existing systems.

use log::debug;
use rand::Rng;

use super::delete_nebulas;
use crate::action::Action;
use crate::nebula::Nebula;
use crate::project::Project;
use crate::settings::NebulaSettings;
use crate::solar_system::SolarSystem;

/// Replace all nebulas using the default [`NebulaSettings`].
pub fn generate_nebulas(project: &Project, rng: &mut impl Rng) -> Vec<Action> {
    generate_nebulas_with(project, &NebulaSettings::default(), rng)
}

/// Replace all nebulas with up to `settings.count` new ones.
///
/// Each nebula is centred on a random system from the candidate pool, and
/// every candidate closer than `settings.min_distance` to that centre is then
/// removed from the pool. Placement stops early once the pool is empty.
pub fn generate_nebulas_with(
    project: &Project,
    settings: &NebulaSettings,
    rng: &mut impl Rng,
) -> Vec<Action> {
    let mut candidates: Vec<SolarSystem> = project.solar_systems().to_vec();
    let mut created = Vec::new();

    for _ in 0..settings.count {
        if candidates.is_empty() {
            break;
        }
        let centre = candidates[rng.gen_range(0..candidates.len())].coordinate;
        let spread = settings.max_radius.saturating_sub(settings.min_radius);
        let radius = if spread == 0 {
            settings.min_radius
        } else {
            settings.min_radius + rng.gen_range(0..spread)
        };
        let Ok(nebula) = Nebula::new(centre, radius.max(1) as i64) else {
            continue;
        };
        candidates.retain(|s| s.coordinate.distance_to(&centre) >= settings.min_distance);
        created.push(Action::CreateNebula { nebula });
    }

    debug!(
        "nebulas: {} placed, {} candidates left",
        created.len(),
        candidates.len()
    );

    delete_nebulas(project).chain(created).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::apply_actions;
    use crate::coordinate::Coordinate;
    use crate::project::Canvas;
    use crate::solar_system::SolarSystemId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn project_with_grid(step: f64, per_side: u32) -> Project {
        let actions: Vec<Action> = (0..per_side * per_side)
            .map(|n| Action::CreateSolarSystem {
                solar_system: SolarSystem::new(
                    SolarSystemId(n),
                    Coordinate::new((n % per_side) as f64 * step, (n / per_side) as f64 * step),
                ),
            })
            .collect();
        apply_actions(&Project::new("nebulas", Canvas::default()).unwrap(), &actions)
    }

    fn created(actions: &[Action]) -> Vec<Nebula> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::CreateNebula { nebula } => Some(*nebula),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_project_creates_nothing() {
        let p = Project::new("empty", Canvas::default()).unwrap();
        assert!(generate_nebulas(&p, &mut StdRng::seed_from_u64(0)).is_empty());
    }

    #[test]
    fn test_empty_pool_only_deletes_existing() {
        let p = Project::new("empty", Canvas::default()).unwrap();
        let old = Nebula::new(Coordinate::new(5.0, 5.0), 20).unwrap();
        let p = apply_actions(&p, &[Action::CreateNebula { nebula: old }]);
        let actions = generate_nebulas(&p, &mut StdRng::seed_from_u64(0));
        assert_eq!(actions, vec![Action::DeleteNebula { nebula: old }]);
    }

    #[test]
    fn test_default_count_radius_and_spacing() {
        let p = project_with_grid(50.0, 20);
        let nebulas = created(&generate_nebulas(&p, &mut StdRng::seed_from_u64(4)));
        assert_eq!(nebulas.len(), 6);
        for (i, a) in nebulas.iter().enumerate() {
            assert!((40..60).contains(&a.radius()));
            for b in &nebulas[i + 1..] {
                assert!(a.coordinate.distance_to(&b.coordinate) >= 150.0);
            }
        }
    }

    #[test]
    fn test_stops_when_pool_is_exhausted() {
        // Nine systems within 40 px of each other: the first nebula eats the pool.
        let p = project_with_grid(10.0, 3);
        let nebulas = created(&generate_nebulas(&p, &mut StdRng::seed_from_u64(2)));
        assert_eq!(nebulas.len(), 1);
    }

    #[test]
    fn test_centres_sit_on_systems() {
        let p = project_with_grid(60.0, 10);
        let settings = NebulaSettings {
            count: 12,
            min_radius: 5,
            max_radius: 6,
            min_distance: 100.0,
        };
        let nebulas = created(&generate_nebulas_with(&p, &settings, &mut StdRng::seed_from_u64(9)));
        assert!(!nebulas.is_empty());
        for n in &nebulas {
            assert_eq!(n.radius(), 5);
            assert!(p.solar_systems().iter().any(|s| s.coordinate == n.coordinate));
        }
    }

    #[test]
    fn test_regenerate_replaces_all() {
        let p = project_with_grid(50.0, 20);
        let mut rng = StdRng::seed_from_u64(12);
        let once = apply_actions(&p, &generate_nebulas(&p, &mut rng));
        let twice = apply_actions(&once, &generate_nebulas(&once, &mut rng));
        assert_eq!(twice.nebulas().len(), 6);
    }
}
