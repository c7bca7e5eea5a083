//! Save/Load functionality for persisting projects
//!
//! Uses bincode for compact binary serialization of a whole project behind
//! a versioned envelope. [`ProjectStore`] keeps one file per project in a
//! directory plus a JSON index listing project names, most recently used
//! first.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use painted_galaxy_logic::project::Project;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

const INDEX_FILE: &str = "projects.json";
const PROJECT_EXTENSION: &str = "galaxy";

/// Serializable snapshot of one project
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    project: Project,
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Index(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
    NotFound(String),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Index(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Index(e) => write!(f, "Project index error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::NotFound(name) => write!(f, "Project \"{}\" not found", name),
        }
    }
}

impl std::error::Error for SaveError {}

/// Save a project to a writer
pub fn save_project<W: Write>(writer: W, project: &Project) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        project: project.clone(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a project from a reader
pub fn load_project<R: Read>(reader: R) -> Result<Project, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(save_data.project)
}

/// Directory of saved projects.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saved project names, most recently saved or loaded first.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let path = self.dir.join(INDEX_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let names = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(names)
    }

    /// Write `project`, replacing any saved project of the same name.
    pub fn save(&self, project: &Project) -> Result<(), SaveError> {
        let path = self.project_path(project.name());
        let mut writer = BufWriter::new(File::create(&path)?);
        save_project(&mut writer, project)?;
        writer.flush()?;
        debug!("saved project \"{}\" to {}", project.name(), path.display());
        self.raise(project.name())
    }

    pub fn load(&self, name: &str) -> Result<Project, SaveError> {
        let path = self.project_path(name);
        if !path.exists() {
            return Err(SaveError::NotFound(name.to_string()));
        }
        let project = load_project(BufReader::new(File::open(&path)?)).map_err(|e| {
            warn!("failed to load project \"{}\": {}", name, e);
            e
        })?;
        self.raise(name)?;
        Ok(project)
    }

    /// Remove a saved project. Deleting a missing project is not an error.
    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        match fs::remove_file(self.project_path(name)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let names: Vec<String> = self.list()?.into_iter().filter(|n| n != name).collect();
        self.write_index(&names)
    }

    /// Store `project` under its (new) name and drop the entry for `old_name`.
    pub fn rename(&self, old_name: &str, project: &Project) -> Result<(), SaveError> {
        if old_name != project.name() {
            self.delete(old_name)?;
        }
        self.save(project)
    }

    /// Move `name` to the front of the index.
    fn raise(&self, name: &str) -> Result<(), SaveError> {
        let mut names = self.list()?;
        names.retain(|n| n != name);
        names.insert(0, name.to_string());
        self.write_index(&names)
    }

    fn write_index(&self, names: &[String]) -> Result<(), SaveError> {
        let mut writer = BufWriter::new(File::create(self.dir.join(INDEX_FILE))?);
        serde_json::to_writer_pretty(&mut writer, names)?;
        writer.flush()?;
        Ok(())
    }

    /// Project names are free text, so files are named by the hex of the name.
    fn project_path(&self, name: &str) -> PathBuf {
        let stem: String = name.bytes().map(|b| format!("{:02x}", b)).collect();
        self.dir.join(format!("{}.{}", stem, PROJECT_EXTENSION))
    }
}
