//! Painted Galaxy Headless Generation Harness
//!
//! Paints a synthetic spiral galaxy, runs the full generation pipeline
//! through the editor and validates the resulting map. Runs entirely
//! in-process with no window and no files unless `--export` is given.
//!
//! Usage:
//!   cargo run -p painted-galaxy-simtest
//!   cargo run -p painted-galaxy-simtest -- --verbose --seed 7
//!   cargo run -p painted-galaxy-simtest -- --settings galaxy.json --export galaxy.txt

use std::collections::HashSet;
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use painted_galaxy_core::canvas::{decode_pixels, encode_pixels};
use painted_galaxy_core::editor::{Editor, GenerateSteps};
use painted_galaxy_core::persistence::{load_project, save_project};
use painted_galaxy_logic::constants::canvas;
use painted_galaxy_logic::density::PixelGrid;
use painted_galaxy_logic::generator::target_spawn_count;
use painted_galaxy_logic::graph::SystemGraph;
use painted_galaxy_logic::project::Project;
use painted_galaxy_logic::settings::{GeneratorSettings, NebulaSettings};
use painted_galaxy_logic::solar_system::SolarSystemId;
use painted_galaxy_logic::triangulation::triangulation_edges;
use serde::Deserialize;

// ── Harness configuration ───────────────────────────────────────────────

/// Contents of the optional `--settings` JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HarnessConfig {
    generator: GeneratorSettings,
    nebulas: NebulaSettings,
}

struct Args {
    verbose: bool,
    seed: u64,
    settings: Option<PathBuf>,
    export: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        seed: 42,
        settings: None,
        export: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value
                    .parse()
                    .map_err(|e| format!("invalid seed {:?}: {}", value, e))?;
            }
            "--settings" => {
                args.settings = Some(iter.next().ok_or("--settings needs a path")?.into());
            }
            "--export" => {
                args.export = Some(iter.next().ok_or("--export needs a path")?.into());
            }
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&Path>) -> Result<HarnessConfig, String> {
    let Some(path) = path else {
        return Ok(HarnessConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    let config = match load_config(args.settings.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let verbose = args.verbose;
    println!("=== Painted Galaxy Generation Harness (seed {}) ===\n", args.seed);

    let pixels = spiral_pixels();
    let canvas = match encode_pixels(&pixels) {
        Ok(canvas) => canvas,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let project = match Project::new("simtest spiral", canvas) {
        Ok(project) => project.with_generator_settings(config.generator),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let mut editor = Editor::with_seed(project, args.seed);
    editor.set_nebula_settings(config.nebulas);
    let before = editor.project().clone();

    let mut results = Vec::new();

    // 1. Generation
    results.extend(run_generation(&mut editor, verbose));
    let generated = editor.project().clone();

    // 2. Placement
    results.extend(validate_placement(&generated, verbose));

    // 3. Hyperlanes
    results.extend(validate_hyperlanes(&generated, verbose));

    // 4. Spawns & nebulas
    results.extend(validate_spawns_and_nebulas(&generated, &config.nebulas, verbose));

    // 5. Undo / redo
    results.extend(validate_history(&mut editor, &before, &generated, verbose));

    // 6. Save / load
    results.extend(validate_persistence(&generated, verbose));

    // 7. Scenario export
    results.extend(validate_export(&mut editor, args.export.as_deref(), verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Canvas-sized spiral: a bright core, three bright arms and a faint halo.
fn spiral_pixels() -> PixelGrid {
    const ARMS: usize = 3;
    let mut px = PixelGrid::filled(canvas::WIDTH, canvas::HEIGHT, canvas::BACKGROUND_RGBA);
    let cx = canvas::WIDTH as f64 / 2.0;
    let cy = canvas::HEIGHT as f64 / 2.0;

    for y in 0..canvas::HEIGHT {
        for x in 0..canvas::WIDTH {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let r = dx.hypot(dy);
            if r > 470.0 {
                continue;
            }
            let theta = dy.atan2(dx);
            let mut brightness: f64 = if r < 80.0 { 1.0 } else { 0.2 };
            for arm in 0..ARMS {
                let arm_angle = arm as f64 * TAU / ARMS as f64 + r / 90.0;
                let diff = (theta - arm_angle).rem_euclid(TAU);
                let arc = diff.min(TAU - diff) * r;
                if arc < 45.0 {
                    brightness = brightness.max(1.0 - arc / 90.0);
                }
            }
            let v = (brightness * 255.0).round() as u8;
            px.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    px
}

fn check(results: &mut Vec<TestResult>, name: &str, passed: bool, detail: String) {
    results.push(TestResult {
        name: name.into(),
        passed,
        detail,
    });
}

// ── 1. Generation ───────────────────────────────────────────────────────

fn run_generation(editor: &mut Editor, verbose: bool) -> Vec<TestResult> {
    println!("--- Generation ---");
    let mut results = Vec::new();

    let outcome = editor.generate(GenerateSteps::ALL);
    check(
        &mut results,
        "generate_all",
        outcome.is_ok(),
        match &outcome {
            Ok(()) => "pipeline completed".into(),
            Err(e) => format!("generation failed: {}", e),
        },
    );
    check(
        &mut results,
        "generate_single_undo_step",
        editor.history().undo_depth() == 1,
        format!("{} history entries", editor.history().undo_depth()),
    );

    if verbose {
        let p = editor.project();
        println!(
            "  {} systems, {} hyperlanes, {} nebulas",
            p.solar_systems().len(),
            p.hyperlanes().len(),
            p.nebulas().len()
        );
    }
    results
}

// ── 2. Placement ────────────────────────────────────────────────────────

fn validate_placement(project: &Project, verbose: bool) -> Vec<TestResult> {
    println!("--- Placement ---");
    let mut results = Vec::new();
    let settings = project.generator_settings();
    let systems = project.solar_systems();

    check(
        &mut results,
        "placement_count",
        !systems.is_empty() && systems.len() <= settings.number_of_systems as usize,
        format!(
            "{} of {} requested systems placed",
            systems.len(),
            settings.number_of_systems
        ),
    );

    let ids_in_order = systems
        .iter()
        .enumerate()
        .all(|(i, s)| s.id == SolarSystemId(i as u32));
    check(
        &mut results,
        "placement_ids_sequential",
        ids_in_order,
        "ids follow creation order".into(),
    );

    match decode_pixels(project.canvas()) {
        Ok(pixels) => {
            let off_density = systems
                .iter()
                .filter(|s| pixels.weight(s.coordinate.x as u32, s.coordinate.y as u32) == 0)
                .count();
            check(
                &mut results,
                "placement_on_painted_density",
                off_density == 0,
                format!("{} systems on unpainted pixels", off_density),
            );
        }
        Err(e) => check(
            &mut results,
            "placement_on_painted_density",
            false,
            format!("canvas decode failed: {}", e),
        ),
    }

    let min = settings.min_distance_between_systems;
    let mut closest = f64::INFINITY;
    for (i, a) in systems.iter().enumerate() {
        for b in &systems[i + 1..] {
            closest = closest.min(a.coordinate.distance_to(&b.coordinate));
        }
    }
    check(
        &mut results,
        "placement_min_distance",
        systems.len() < 2 || closest > min,
        format!("closest pair {:.1}px (minimum {:.1}px)", closest, min),
    );

    if verbose {
        println!("  closest pair {:.2}px", closest);
    }
    results
}

// ── 3. Hyperlanes ───────────────────────────────────────────────────────

fn validate_hyperlanes(project: &Project, verbose: bool) -> Vec<TestResult> {
    println!("--- Hyperlanes ---");
    let mut results = Vec::new();

    let mut systems = project.solar_systems().to_vec();
    systems.sort_by(|a, b| a.coordinate.cmp(&b.coordinate));
    let points: Vec<_> = systems.iter().map(|s| s.coordinate).collect();
    let ids: Vec<_> = systems.iter().map(|s| s.id).collect();
    let triangulated: HashSet<(SolarSystemId, SolarSystemId)> = triangulation_edges(&points)
        .into_iter()
        .map(|(i, j)| (ids[i].min(ids[j]), ids[i].max(ids[j])))
        .collect();

    let outside = project
        .hyperlanes()
        .iter()
        .filter(|c| !triangulated.contains(&c.key()))
        .count();
    check(
        &mut results,
        "hyperlanes_from_triangulation",
        outside == 0,
        format!(
            "{} of {} hyperlanes not in the triangulation",
            outside,
            project.hyperlanes().len()
        ),
    );

    let lanes = SystemGraph::new(
        ids.iter().copied(),
        project.hyperlanes().iter().map(|c| (c.a, c.b)),
    );
    let settings = project.generator_settings();
    if settings.allow_disconnected {
        check(
            &mut results,
            "hyperlanes_connected",
            true,
            format!("{} components (disconnection allowed)", lanes.component_count()),
        );
    } else {
        check(
            &mut results,
            "hyperlanes_connected",
            lanes.node_count() < 3 || lanes.component_count() == 1,
            format!(
                "{} components over {} systems",
                lanes.component_count(),
                lanes.node_count()
            ),
        );
    }

    let too_long = project
        .hyperlanes()
        .iter()
        .filter_map(|c| {
            let a = project.solar_system(c.a)?;
            let b = project.solar_system(c.b)?;
            Some(a.coordinate.distance_to(&b.coordinate))
        })
        .filter(|&d| d > settings.hyperlane_max_distance)
        .count();
    // Without allow_disconnected, over-long spanning tree edges are kept.
    if settings.allow_disconnected {
        check(
            &mut results,
            "hyperlanes_max_distance",
            too_long == 0,
            format!("{} lanes longer than the maximum", too_long),
        );
    } else if verbose {
        println!("  {} lanes over the maximum kept for connectivity", too_long);
    }

    let dangling = project.dangling_connections();
    check(
        &mut results,
        "hyperlanes_no_dangling",
        dangling.is_empty(),
        format!("{} dangling connections", dangling.len()),
    );

    if verbose {
        println!(
            "  {} hyperlanes of {} triangulation edges",
            project.hyperlanes().len(),
            triangulated.len()
        );
    }
    results
}

// ── 4. Spawns & nebulas ─────────────────────────────────────────────────

fn validate_spawns_and_nebulas(
    project: &Project,
    nebula_settings: &NebulaSettings,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Spawns & Nebulas ---");
    let mut results = Vec::new();

    let n = project.solar_systems().len();
    let spawns = project
        .solar_systems()
        .iter()
        .filter(|s| s.spawn_type.is_spawn())
        .count();
    let expected = target_spawn_count(n).min(n);
    check(
        &mut results,
        "spawn_count",
        spawns == expected,
        format!("{} spawns, expected {}", spawns, expected),
    );

    let nebulas = project.nebulas();
    check(
        &mut results,
        "nebula_count",
        nebulas.len() <= nebula_settings.count as usize,
        format!("{} nebulas (at most {})", nebulas.len(), nebula_settings.count),
    );

    let mut closest = f64::INFINITY;
    for (i, a) in nebulas.iter().enumerate() {
        for b in &nebulas[i + 1..] {
            closest = closest.min(a.coordinate.distance_to(&b.coordinate));
        }
    }
    check(
        &mut results,
        "nebula_spacing",
        nebulas.len() < 2 || closest >= nebula_settings.min_distance,
        format!("closest nebula centres {:.1}px apart", closest),
    );

    if verbose {
        for nebula in nebulas {
            println!(
                "  nebula at ({:.0}, {:.0}) r={}",
                nebula.coordinate.x,
                nebula.coordinate.y,
                nebula.radius()
            );
        }
    }
    results
}

// ── 5. Undo / redo ──────────────────────────────────────────────────────

fn validate_history(
    editor: &mut Editor,
    before: &Project,
    generated: &Project,
    _verbose: bool,
) -> Vec<TestResult> {
    println!("--- Undo / Redo ---");
    let mut results = Vec::new();

    let undone = editor.undo().is_ok() && editor.project() == before;
    check(
        &mut results,
        "undo_restores_blank_map",
        undone,
        "undo of the generation batch".into(),
    );

    let redone = editor.redo().is_ok() && editor.project() == generated;
    check(
        &mut results,
        "redo_restores_generated_map",
        redone,
        "redo of the generation batch".into(),
    );

    check(
        &mut results,
        "redo_stack_empty",
        !editor.can_redo() && editor.redo().is_err(),
        "nothing left to redo".into(),
    );
    results
}

// ── 6. Save / load ──────────────────────────────────────────────────────

fn validate_persistence(project: &Project, verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut buffer = Vec::new();
    let outcome = save_project(&mut buffer, project).and_then(|()| load_project(&buffer[..]));
    match outcome {
        Ok(loaded) => check(
            &mut results,
            "save_load_roundtrip",
            &loaded == project,
            format!("{} bytes", buffer.len()),
        ),
        Err(e) => check(
            &mut results,
            "save_load_roundtrip",
            false,
            format!("save/load failed: {}", e),
        ),
    }

    if verbose {
        println!("  saved project is {} bytes", buffer.len());
    }
    results
}

// ── 7. Scenario export ──────────────────────────────────────────────────

fn validate_export(
    editor: &mut Editor,
    path: Option<&Path>,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Scenario Export ---");
    let mut results = Vec::new();

    let text = editor.export();
    let project = editor.project();
    let systems = text.lines().filter(|l| l.starts_with("\tsystem = {")).count();
    let lanes = text
        .lines()
        .filter(|l| l.starts_with("\tadd_hyperlane"))
        .count();
    check(
        &mut results,
        "export_systems",
        systems == project.solar_systems().len(),
        format!("{} system entries", systems),
    );
    check(
        &mut results,
        "export_hyperlanes",
        lanes == project.hyperlanes().len(),
        format!("{} hyperlane entries", lanes),
    );

    if let Some(path) = path {
        let written = std::fs::write(path, &text);
        check(
            &mut results,
            "export_written",
            written.is_ok(),
            match written {
                Ok(()) => format!("{} bytes to {}", text.len(), path.display()),
                Err(e) => format!("cannot write {}: {}", path.display(), e),
            },
        );
    }

    if verbose {
        println!("  scenario is {} lines", text.lines().count());
    }
    results
}
