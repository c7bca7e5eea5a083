//! Static galaxy scenario export.
//!
//! Turns a [`Project`] into the text format the game reads from a mod's
//! `map/setup_scenarios` folder: one `system` entry per solar system, one
//! `add_hyperlane` per hyperlane and one `nebula` per nebula, wrapped in a
//! `static_galaxy_scenario` block with size-dependent game settings.
//!
//! Besides the plain geometry the export carries a few gameplay hints:
//! - spawn systems get an empire initializer and a spawn-weight value,
//! - systems near a spawn get a basic initializer so empires do not start
//!   boxed in by hostile systems,
//! - empty circles next to systems are flagged as fallen empire spawns,
//! - wormhole endpoints are flagged with their wormhole index.

use std::collections::HashSet;

use rand::Rng;

use crate::constants::{canvas, spawns};
use crate::coordinate::Coordinate;
use crate::nebula::Nebula;
use crate::project::Project;
use crate::solar_system::{SolarSystem, SolarSystemId, SpawnType};

const HEADER: &str = "# Copy this file into your mod's map/setup_scenarios folder to play on the painted galaxy";

const COMMON: &str = "
\tpriority = 10
\tsupports_shape = elliptical
\tsupports_shape = ring
\tsupports_shape = spiral_2
\tsupports_shape = spiral_3
\tsupports_shape = spiral_4
\tsupports_shape = spiral_6
\tsupports_shape = bar
\tsupports_shape = starburst
\tsupports_shape = cartwheel
\tsupports_shape = spoked
\trandom_hyperlanes = no

\tnum_wormhole_pairs = { min = 0 max = 5 }
\tnum_wormhole_pairs_default = 1
\tnum_gateways = { min = 0 max = 5 }
\tnum_gateways_default = 1
\tnum_hyperlanes = { min=0.5 max= 3 }
\tnum_hyperlanes_default = 1
\tcolonizable_planet_odds = 1.0
\tprimitive_odds = 1.0
";

/// Basic system initializers, repeated by relative weight.
const BASIC_INITIALIZERS: &[(&str, usize)] = &[
    ("basic_init_01", 20),
    ("basic_init_02", 20),
    ("basic_init_03", 10),
    ("basic_init_04", 10),
    ("basic_init_05", 6),
    ("basic_init_06", 4),
    ("asteroid_init_01", 2),
    ("binary_init_01", 6),
    ("binary_init_02", 4),
    ("trinary_init_01", 3),
    ("trinary_init_02", 3),
];

// ── Size tiers ──────────────────────────────────────────────────────────

/// Galaxy size bracket, chosen from the number of systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

impl SizeTier {
    pub fn for_system_count(count: usize) -> Self {
        match count {
            c if c >= 1000 => SizeTier::Huge,
            c if c >= 800 => SizeTier::Large,
            c if c >= 600 => SizeTier::Medium,
            c if c >= 400 => SizeTier::Small,
            _ => SizeTier::Tiny,
        }
    }

    fn settings(self) -> &'static str {
        match self {
            SizeTier::Tiny => {
                "
\tfallen_empire_default = 0
\tfallen_empire_max = 1
\tmarauder_empire_default = 1
\tmarauder_empire_max = 1
\tadvanced_empire_default = 0
\tcrisis_strength = 0.5
\textra_crisis_strength = { 10 25 }
"
            }
            SizeTier::Small => {
                "
\tfallen_empire_default = 1
\tfallen_empire_max = 2
\tmarauder_empire_default = 1
\tmarauder_empire_max = 2
\tadvanced_empire_default = 1
\tcrisis_strength = 0.75
\textra_crisis_strength = { 10 25 }
"
            }
            SizeTier::Medium => {
                "
\tfallen_empire_default = 2
\tfallen_empire_max = 3
\tmarauder_empire_default = 2
\tmarauder_empire_max = 2
\tadvanced_empire_default = 2
\tcrisis_strength = 1.0
\textra_crisis_strength = { 10 25 }
"
            }
            SizeTier::Large => {
                "
\tfallen_empire_default = 3
\tfallen_empire_max = 4
\tmarauder_empire_default = 2
\tmarauder_empire_max = 3
\tadvanced_empire_default = 3
\tcrisis_strength = 1.25
\textra_crisis_strength = { 10 25 }
"
            }
            SizeTier::Huge => {
                "
\tfallen_empire_default = 4
\tfallen_empire_max = 6
\tmarauder_empire_default = 3
\tmarauder_empire_max = 3
\tadvanced_empire_default = 4
\tcrisis_strength = 1.5
\textra_crisis_strength = { 10 25 }
"
            }
        }
    }
}

// ── Fallen empire spawns ────────────────────────────────────────────────

/// Compass direction of a fallen empire spawn circle relative to its system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::East => "e",
            Direction::South => "s",
            Direction::West => "w",
        }
    }

    /// Centre of the spawn circle in this direction from `from`.
    pub fn origin(self, from: Coordinate) -> Coordinate {
        let r = spawns::FALLEN_EMPIRE_SPAWN_RADIUS;
        match self {
            Direction::North => Coordinate::new(from.x, from.y - r),
            Direction::East => Coordinate::new(from.x + r, from.y),
            Direction::South => Coordinate::new(from.x, from.y + r),
            Direction::West => Coordinate::new(from.x - r, from.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallenEmpireSpawn {
    pub solar_system: SolarSystemId,
    pub direction: Direction,
}

/// Empty circles next to systems where a fallen empire can appear.
///
/// A circle of radius 50 is accepted if it stays inside the canvas margin,
/// holds no system, and does not overlap a circle accepted earlier.
pub fn fallen_empire_spawns(systems: &[SolarSystem]) -> Vec<FallenEmpireSpawn> {
    let r = spawns::FALLEN_EMPIRE_SPAWN_RADIUS;
    let mut accepted = Vec::new();
    let mut origins: Vec<Coordinate> = Vec::new();
    for system in systems {
        for direction in Direction::ALL {
            let origin = direction.origin(system.coordinate);
            if origin.x < r
                || origin.x > canvas::WIDTH as f64 - r
                || origin.y < r
                || origin.y > canvas::HEIGHT as f64 - r
            {
                continue;
            }
            let clear = systems.iter().all(|s| s.coordinate.distance_to(&origin) >= r)
                && origins.iter().all(|o| o.distance_to(&origin) >= r * 2.0);
            if clear {
                origins.push(origin);
                accepted.push(FallenEmpireSpawn {
                    solar_system: system.id,
                    direction,
                });
            }
        }
    }
    accepted
}

// ── Nebula groups ───────────────────────────────────────────────────────

/// Partition nebulas into groups of transitively overlapping discs, each
/// sorted by radius, largest first.
pub fn nebula_groups(nebulas: &[Nebula]) -> Vec<Vec<Nebula>> {
    let mut groups: Vec<Vec<Nebula>> = Vec::new();
    for &nebula in nebulas {
        let (touching, rest): (Vec<_>, Vec<_>) = groups
            .into_iter()
            .partition(|group| group.iter().any(|n| n.overlaps(&nebula)));
        groups = rest;
        let mut merged: Vec<Nebula> = touching.into_iter().flatten().collect();
        merged.push(nebula);
        groups.push(merged);
    }
    for group in &mut groups {
        group.sort_by(|a, b| b.radius().cmp(&a.radius()));
    }
    groups
}

// ── Export ──────────────────────────────────────────────────────────────

/// Render the scenario text for `project`.
///
/// `rng` decides which systems near spawns receive a basic initializer and
/// which one they get.
pub fn export_scenario(project: &Project, rng: &mut impl Rng) -> String {
    let systems = project.solar_systems();
    let homes: Vec<&SolarSystem> = systems.iter().filter(|s| s.spawn_type.is_spawn()).collect();

    let sections = [
        HEADER.to_string(),
        "static_galaxy_scenario = {".to_string(),
        format!("\tname=\"{}\"", project.name()),
        COMMON.to_string(),
        empire_settings(homes.len()),
        SizeTier::for_system_count(systems.len()).settings().to_string(),
        system_entries(project, rng),
        hyperlane_entries(project),
        nebula_entries(project.nebulas()),
        "}".to_string(),
    ];
    sections.join("\n\n")
}

fn empire_settings(home_count: usize) -> String {
    let max = (home_count as f64 / spawns::SPAWNS_PER_MAX_AI_EMPIRE).round();
    let default = (home_count as f64 / spawns::SPAWNS_PER_MAX_AI_EMPIRE / 2.0).round();
    format!(
        "\n\tnum_empires = {{ min = 0 max = {} }}\t# fewer than the spawn count; not every spawn becomes an AI empire\n\tnum_empire_default = {}\n",
        max, default
    )
}

/// Systems one and two hyperlane jumps away from the nearest spawn.
fn spawn_neighbourhood(project: &Project) -> (HashSet<SolarSystemId>, HashSet<SolarSystemId>) {
    let is_spawn = |id: SolarSystemId| {
        project
            .solar_system(id)
            .map_or(false, |s| s.spawn_type.is_spawn())
    };

    let mut one_jump = HashSet::new();
    for c in project.hyperlanes() {
        match (is_spawn(c.a), is_spawn(c.b)) {
            (true, false) => {
                one_jump.insert(c.b);
            }
            (false, true) => {
                one_jump.insert(c.a);
            }
            _ => {}
        }
    }

    let mut two_jumps = HashSet::new();
    for c in project.hyperlanes() {
        let (a_near, b_near) = (one_jump.contains(&c.a), one_jump.contains(&c.b));
        if a_near && !b_near && !is_spawn(c.b) {
            two_jumps.insert(c.b);
        } else if b_near && !a_near && !is_spawn(c.a) {
            two_jumps.insert(c.a);
        }
    }
    (one_jump, two_jumps)
}

fn basic_initializer(rng: &mut impl Rng) -> &'static str {
    let total: usize = BASIC_INITIALIZERS.iter().map(|(_, w)| w).sum();
    let mut pick = rng.gen_range(0..total);
    for &(name, weight) in BASIC_INITIALIZERS {
        if pick < weight {
            return name;
        }
        pick -= weight;
    }
    BASIC_INITIALIZERS[0].0
}

/// Export-space value as the game expects it: integral values without a
/// fractional part and never `-0`.
fn number(value: f64) -> String {
    format!("{}", value + 0.0)
}

fn position(c: Coordinate) -> String {
    let exported = c.to_export();
    format!("position = {{ x = {} y = {} }}", number(exported.x), number(exported.y))
}

fn system_entries(project: &Project, rng: &mut impl Rng) -> String {
    let systems = project.solar_systems();
    let preferred: Vec<SolarSystemId> = systems
        .iter()
        .filter(|s| s.spawn_type == SpawnType::Preferred)
        .map(|s| s.id)
        .collect();
    let home_count = systems.iter().filter(|s| s.spawn_type.is_spawn()).count();
    let (one_jump, two_jumps) = spawn_neighbourhood(project);
    let basic_share = if systems.is_empty() {
        1.0
    } else {
        (home_count + one_jump.len() + two_jumps.len()) as f64 / systems.len() as f64
    };
    let fallen = fallen_empire_spawns(systems);

    let mut lines = Vec::with_capacity(systems.len());
    for (i, system) in systems.iter().enumerate() {
        let mut parts = vec![format!("id = \"{}\"", system.id), position(system.coordinate)];

        if system.spawn_type.is_spawn() {
            parts.push(format!("initializer = random_empire_init_0{}", i % 6 + 1));
            let params = match preferred.iter().position(|&id| id == system.id) {
                Some(k) => format!("|PREFERRED|yes|RANDOM_MODULO|{}|RANDOM_VALUE|{}|", preferred.len(), k),
                None => format!("|RANDOM_MODULO|10|RANDOM_VALUE|{}|", i % 10),
            };
            parts.push(format!(
                "spawn_weight = {{ base = 0 add = value:painted_galaxy_spawn_weight{} }}",
                params
            ));
        } else if one_jump.contains(&system.id) {
            parts.push(format!("initializer = {}", basic_initializer(rng)));
        } else if two_jumps.contains(&system.id) && rng.gen::<f64>() < 1.0 - basic_share {
            parts.push(format!("initializer = {}", basic_initializer(rng)));
        }

        let mut flags: Vec<String> = Vec::new();
        let directions: Vec<&str> = fallen
            .iter()
            .filter(|fe| fe.solar_system == system.id)
            .map(|fe| fe.direction.suffix())
            .collect();
        if !directions.is_empty() {
            flags.push("set_star_flag = painted_galaxy_fe_spawn".to_string());
            for d in directions {
                flags.push(format!("set_star_flag = painted_galaxy_fe_spawn_{}", d));
            }
        }
        if let Some(index) = project.wormholes().iter().position(|c| c.touches(system.id)) {
            flags.push(format!("set_star_flag = painted_galaxy_wormhole_{}", index));
        }
        if !flags.is_empty() {
            parts.push(format!("effect = {{ {} }}", flags.join(" ")));
        }

        lines.push(format!("\tsystem = {{ {} }}", parts.join(" ")));
    }
    lines.join("\n")
}

fn hyperlane_entries(project: &Project) -> String {
    project
        .hyperlanes()
        .iter()
        .map(|c| format!("\tadd_hyperlane = {{ from = \"{}\" to = \"{}\" }}", c.a, c.b))
        .collect::<Vec<_>>()
        .join("\n")
}

fn nebula_entries(nebulas: &[Nebula]) -> String {
    let mut lines = Vec::new();
    for group in nebula_groups(nebulas) {
        for (i, nebula) in group.iter().enumerate() {
            let name = if i == 0 { "" } else { "name = \" \" " };
            lines.push(format!(
                "\tnebula = {{ {}{} radius = {} }}",
                name,
                position(nebula.coordinate),
                nebula.radius()
            ));
        }
    }
    lines.join("\n")
}
