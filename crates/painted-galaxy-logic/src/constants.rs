//! Map constants: canvas size, spawn scaling and random nebula parameters.
//!
//! These are plain numeric constants with no I/O dependency.
//! The editor core, the scenario exporter and the simtest harness all use these.

/// Canvas dimensions. The painted canvas, the overlay and the game map share them.
pub mod canvas {
    pub const WIDTH: u32 = 1000;
    pub const HEIGHT: u32 = 1000;
    /// Background colour of a fresh canvas (opaque black, zero density).
    pub const BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 255];
    /// Slider max for the hyperlane length setting.
    pub const MAX_CONNECTION_LENGTH: f64 = 500.0;
}

pub mod spawns {
    /// The game's maximum AI empire count per 200 systems.
    pub const MAX_AI_EMPIRES_PER_200_SYSTEMS: f64 = 6.0;
    /// AI empires don't account for all spawns (players, some origins),
    /// so there are more spawn locations than allowed AI empires.
    pub const SPAWNS_PER_MAX_AI_EMPIRE: f64 = 1.5;
    /// Radius of the empty circle searched for dynamic fallen empire spawns.
    pub const FALLEN_EMPIRE_SPAWN_RADIUS: f64 = 50.0;
}

pub mod nebulas {
    /// Number of nebulas created when randomizing.
    pub const NUM_RANDOM_NEBULAS: u32 = 6;
    pub const RANDOM_NEBULA_MIN_RADIUS: u32 = 40;
    pub const RANDOM_NEBULA_MAX_RADIUS: u32 = 60;
    /// Minimum centre-to-centre distance between random nebulas.
    pub const RANDOM_NEBULA_MIN_DISTANCE: f64 = 150.0;
}

pub mod density {
    /// Upper bound of a single pixel weight.
    pub const MAX_PIXEL_WEIGHT: u32 = 100;
}
