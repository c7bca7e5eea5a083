//! Editor engine - owns the open project, its undo history and the RNG
//!
//! Every undoable edit goes through [`Editor::apply_actions`] so that the
//! batch lands on the history exactly as it was applied. Generation runs the
//! requested generators in pipeline order, each one seeing the previous
//! step's result, and records them together as one batch.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use painted_galaxy_logic::action::Action;
use painted_galaxy_logic::applier::{apply_actions, undo_actions};
use painted_galaxy_logic::error::ModelError;
use painted_galaxy_logic::generator::{
    generate_hyperlanes, generate_nebulas_with, generate_solar_systems, generate_spawns,
};
use painted_galaxy_logic::project::{Canvas, Project};
use painted_galaxy_logic::scenario::export_scenario;
use painted_galaxy_logic::settings::{GeneratorSettings, NebulaSettings};
use painted_galaxy_logic::solar_system::SolarSystemId;

use crate::canvas::{blank_canvas, decode_pixels, CanvasError};
use crate::history::{History, HistoryError};

/// Which generators [`Editor::generate`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateSteps {
    pub solar_systems: bool,
    pub hyperlanes: bool,
    pub spawns: bool,
    pub nebulas: bool,
}

impl GenerateSteps {
    pub const ALL: GenerateSteps = GenerateSteps {
        solar_systems: true,
        hyperlanes: true,
        spawns: true,
        nebulas: true,
    };

    pub fn all() -> Self {
        Self::ALL
    }

    pub fn is_empty(&self) -> bool {
        !(self.solar_systems || self.hyperlanes || self.spawns || self.nebulas)
    }
}

#[derive(Debug)]
pub enum EditorError {
    Canvas(CanvasError),
    Model(ModelError),
    History(HistoryError),
}

impl From<CanvasError> for EditorError {
    fn from(e: CanvasError) -> Self {
        EditorError::Canvas(e)
    }
}

impl From<ModelError> for EditorError {
    fn from(e: ModelError) -> Self {
        EditorError::Model(e)
    }
}

impl From<HistoryError> for EditorError {
    fn from(e: HistoryError) -> Self {
        EditorError::History(e)
    }
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::Canvas(e) => write!(f, "{}", e),
            EditorError::Model(e) => write!(f, "{}", e),
            EditorError::History(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EditorError {}

/// Main editor engine
pub struct Editor {
    project: Project,
    history: History,
    rng: StdRng,
    nebula_settings: NebulaSettings,
}

impl Editor {
    /// Open `project` with an entropy-seeded RNG.
    pub fn new(project: Project) -> Self {
        Self::with_rng(project, StdRng::from_entropy())
    }

    /// Open `project` with a fixed seed, for reproducible generation.
    pub fn with_seed(project: Project, seed: u64) -> Self {
        Self::with_rng(project, StdRng::seed_from_u64(seed))
    }

    fn with_rng(project: Project, rng: StdRng) -> Self {
        Self {
            project,
            history: History::new(),
            rng,
            nebula_settings: NebulaSettings::default(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn nebula_settings(&self) -> &NebulaSettings {
        &self.nebula_settings
    }

    pub fn set_nebula_settings(&mut self, settings: NebulaSettings) {
        self.nebula_settings = settings;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a batch and record it for undo.
    pub fn apply_actions(&mut self, actions: Vec<Action>) {
        if actions.is_empty() {
            return;
        }
        self.project = apply_actions(&self.project, &actions);
        debug!("applied {} actions", actions.len());
        self.history.record(actions);
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let batch = self.history.undo()?;
        self.project = undo_actions(&self.project, batch);
        debug!("undid {} actions", batch.len());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        let batch = self.history.redo()?;
        self.project = apply_actions(&self.project, batch);
        debug!("redid {} actions", batch.len());
        Ok(())
    }

    /// Run the selected generators in order and record them as one batch.
    ///
    /// Placement decodes the canvas first; if that fails nothing is applied.
    pub fn generate(&mut self, steps: GenerateSteps) -> Result<(), EditorError> {
        let mut project = self.project.clone();
        let mut batch = Vec::new();

        if steps.solar_systems {
            let pixels = decode_pixels(project.canvas())?;
            let actions = generate_solar_systems(&project, &pixels, &mut self.rng);
            project = apply_actions(&project, &actions);
            batch.extend(actions);
        }
        if steps.hyperlanes {
            let actions = generate_hyperlanes(&project, &mut self.rng);
            project = apply_actions(&project, &actions);
            batch.extend(actions);
        }
        if steps.spawns {
            let actions = generate_spawns(&project, &mut self.rng);
            project = apply_actions(&project, &actions);
            batch.extend(actions);
        }
        if steps.nebulas {
            let actions = generate_nebulas_with(&project, &self.nebula_settings, &mut self.rng);
            project = apply_actions(&project, &actions);
            batch.extend(actions);
        }

        info!(
            "Generated {} systems, {} hyperlanes, {} nebulas ({} actions)",
            project.solar_systems().len(),
            project.hyperlanes().len(),
            project.nebulas().len(),
            batch.len()
        );
        if !batch.is_empty() {
            self.project = project;
            self.history.record(batch);
        }
        Ok(())
    }

    /// Replace the painted canvas (undoable).
    pub fn set_canvas(&mut self, bytes: impl Into<Vec<u8>>) {
        let action = Action::SetCanvas {
            old_value: self.project.canvas().clone(),
            new_value: Canvas::from_bytes(bytes),
        };
        self.apply_actions(vec![action]);
    }

    /// Delete a system and every connection touching it (undoable).
    /// Unknown ids are ignored.
    pub fn delete_solar_system(&mut self, id: SolarSystemId) {
        let actions = self.project.delete_solar_system_actions(id);
        self.apply_actions(actions);
    }

    /// Not undoable.
    pub fn update_generator_settings(&mut self, settings: GeneratorSettings) {
        self.project = self.project.with_generator_settings(settings);
    }

    /// Not undoable.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), EditorError> {
        self.project = self.project.renamed(name)?;
        Ok(())
    }

    /// Start over with an empty project on a blank canvas.
    pub fn new_project(&mut self, name: impl Into<String>) -> Result<(), EditorError> {
        let project = Project::new(name, blank_canvas()?)?;
        self.open(project);
        Ok(())
    }

    /// Replace the open project, dropping all history.
    pub fn open(&mut self, project: Project) {
        info!("Opened project \"{}\"", project.name());
        self.project = project;
        self.history.clear();
    }

    /// Scenario text for the open project.
    pub fn export(&mut self) -> String {
        export_scenario(&self.project, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::encode_pixels;
    use painted_galaxy_logic::density::PixelGrid;
    use painted_galaxy_logic::graph::SystemGraph;

    fn settings() -> GeneratorSettings {
        GeneratorSettings {
            number_of_systems: 40,
            min_distance_between_systems: 60.0,
            hyperlane_connectivity: 0.5,
            hyperlane_max_distance: 200.0,
            allow_disconnected: false,
        }
    }

    /// Fully white canvas, painted small and stretched by the decoder.
    fn painted_editor(seed: u64) -> Editor {
        let canvas = encode_pixels(&PixelGrid::filled(50, 50, [255, 255, 255, 255])).unwrap();
        let project = Project::new("test", canvas)
            .unwrap()
            .with_generator_settings(settings());
        Editor::with_seed(project, seed)
    }

    #[test]
    fn test_generate_all_is_one_undo_step() {
        let mut editor = painted_editor(1);
        let before = editor.project().clone();
        editor.generate(GenerateSteps::ALL).unwrap();

        let project = editor.project();
        assert_eq!(project.solar_systems().len(), 40);
        assert!(!project.hyperlanes().is_empty());
        assert!(!project.nebulas().is_empty());
        assert_eq!(editor.history().undo_depth(), 1);

        let graph = SystemGraph::new(
            project.solar_systems().iter().map(|s| s.id),
            project.hyperlanes().iter().map(|c| (c.a, c.b)),
        );
        assert_eq!(graph.component_count(), 1);

        let generated = editor.project().clone();
        editor.undo().unwrap();
        assert_eq!(editor.project(), &before);
        editor.redo().unwrap();
        assert_eq!(editor.project(), &generated);
    }

    #[test]
    fn test_generate_on_blank_canvas_records_nothing() {
        let mut editor = Editor::with_seed(Project::new("blank", Canvas::default()).unwrap(), 0);
        editor.new_project("blank").unwrap();
        editor.generate(GenerateSteps::ALL).unwrap();
        assert!(editor.project().solar_systems().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_undecodable_canvas_applies_nothing() {
        let mut editor = Editor::with_seed(Project::new("bad", Canvas::default()).unwrap(), 0);
        let err = editor.generate(GenerateSteps::ALL).unwrap_err();
        assert!(matches!(err, EditorError::Canvas(_)));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_single_step_uses_current_map() {
        let mut editor = painted_editor(2);
        editor
            .generate(GenerateSteps {
                solar_systems: true,
                ..GenerateSteps::default()
            })
            .unwrap();
        assert!(editor.project().hyperlanes().is_empty());
        let systems = editor.project().solar_systems().to_vec();

        editor
            .generate(GenerateSteps {
                hyperlanes: true,
                ..GenerateSteps::default()
            })
            .unwrap();
        assert_eq!(editor.project().solar_systems(), systems.as_slice());
        assert!(!editor.project().hyperlanes().is_empty());
        assert_eq!(editor.history().undo_depth(), 2);
    }

    #[test]
    fn test_delete_solar_system_cascades_and_undoes() {
        let mut editor = painted_editor(3);
        editor.generate(GenerateSteps::ALL).unwrap();
        let before = editor.project().clone();
        let id = before.hyperlanes().iter().next().unwrap().a;

        editor.delete_solar_system(id);
        assert!(editor.project().solar_system(id).is_none());
        assert!(editor.project().dangling_connections().is_empty());
        assert!(editor.project().hyperlanes().iter().all(|c| !c.touches(id)));

        editor.undo().unwrap();
        assert_eq!(editor.project(), &before);
    }

    #[test]
    fn test_set_canvas_is_undoable() {
        let mut editor = painted_editor(4);
        let original = editor.project().canvas().clone();
        editor.set_canvas(vec![9, 9, 9]);
        assert_eq!(editor.project().canvas().as_bytes(), &[9, 9, 9]);
        editor.undo().unwrap();
        assert_eq!(editor.project().canvas(), &original);
        assert!(editor.can_redo());
    }

    #[test]
    fn test_settings_and_rename_bypass_history() {
        let mut editor = painted_editor(5);
        editor.update_generator_settings(settings().with_connectivity(0.9));
        editor.rename("renamed").unwrap();
        assert_eq!(editor.project().name(), "renamed");
        assert_eq!(editor.project().generator_settings().hyperlane_connectivity, 0.9);
        assert!(!editor.can_undo());
        assert!(matches!(editor.rename("  "), Err(EditorError::Model(_))));
    }

    #[test]
    fn test_open_resets_history() {
        let mut editor = painted_editor(6);
        editor.generate(GenerateSteps::ALL).unwrap();
        editor.undo().unwrap();
        editor.open(Project::new("other", Canvas::default()).unwrap());
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
        assert!(matches!(
            editor.redo(),
            Err(EditorError::History(HistoryError::NothingToRedo))
        ));
    }

    #[test]
    fn test_same_seed_same_map() {
        let mut a = painted_editor(77);
        let mut b = painted_editor(77);
        a.generate(GenerateSteps::ALL).unwrap();
        b.generate(GenerateSteps::ALL).unwrap();
        assert_eq!(a.project(), b.project());
        assert_eq!(a.export(), b.export());
    }
}
