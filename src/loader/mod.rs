//! Scenario loading from plain-text board and property files.
//!
//! A scenario directory holds `board.txt` and one `<id>.txt` per property.
//! Both formats split tokens on commas and whitespace.

pub mod board_text;
pub mod property_text;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use board_text::parse_board;
pub use property_text::parse_property;

use crate::board::Grid;
use crate::core::{ConfigError, Randomness, SessionConfig};
use crate::economy::{PropertyDef, PropertyId};
use crate::rules::Session;

/// Name of the board layout file inside a scenario directory.
pub const BOARD_FILE: &str = "board.txt";

/// A parsed scenario, ready to seat players.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub grid: Grid,
    /// Definitions in ascending id order.
    pub properties: Vec<PropertyDef>,
}

impl Scenario {
    /// Start a session on this scenario.
    pub fn into_session<R: Randomness>(
        self,
        config: SessionConfig,
        rng: R,
    ) -> Result<Session<R>, ConfigError> {
        Session::new(config, self.grid, self.properties, rng)
    }
}

/// Read `board.txt` and every `<id>.txt` property file in `dir`.
pub fn load_scenario(dir: impl AsRef<Path>) -> Result<Scenario, ConfigError> {
    let dir = dir.as_ref();

    let board_path = dir.join(BOARD_FILE);
    let grid = parse_board(&read(&board_path)?).map_err(|e| in_file(&board_path, e))?;

    let entries = fs::read_dir(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut properties = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt")
            || path.file_name().and_then(|n| n.to_str()) == Some(BOARD_FILE)
        {
            continue;
        }

        let id = property_id(&path)?;
        let def = parse_property(id, &read(&path)?).map_err(|e| in_file(&path, e))?;
        properties.push(def);
    }
    properties.sort_by_key(|d| d.id);

    debug!(
        dir = %dir.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        properties = properties.len(),
        "scenario loaded"
    );
    Ok(Scenario { grid, properties })
}

/// Split a line into tokens on commas and whitespace.
pub(crate) fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

pub(crate) fn parse_error(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Parse {
        line,
        message: message.into(),
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn property_id(path: &Path) -> Result<PropertyId, ConfigError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse::<u32>().ok())
        .map(PropertyId::new)
        .ok_or_else(|| {
            parse_error(
                0,
                format!("{}: file name is not a property id", path.display()),
            )
        })
}

/// Prefix parse errors with the file they came from.
fn in_file(path: &Path, err: ConfigError) -> ConfigError {
    match err {
        ConfigError::Parse { line, message } => ConfigError::Parse {
            line,
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    }
}
