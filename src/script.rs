//! Step-script and informant-location file loaders
//!
//! Both files hold whitespace-separated `row,col` tokens; step scripts
//! conventionally use a single line. Parsing is the driver's concern and
//! never touches the knowledge base.

use crate::grid::Cell;
use crate::{Result, SeekerError};
use std::fs;
use std::path::Path;

/// Parses a whitespace-separated sequence of `row,col` cells
pub fn parse_steps(text: &str) -> Result<Vec<Cell>> {
    let cells: Vec<Cell> = text
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_>>()?;
    if cells.is_empty() {
        return Err(SeekerError::Script("no steps found".into()));
    }
    Ok(cells)
}

/// Loads the agent's movement script from a file
pub fn load_steps(path: &Path) -> Result<Vec<Cell>> {
    parse_steps(&fs::read_to_string(path)?)
}

/// Loads informant locations from a file; an absent list is an empty world
pub fn load_informants(path: &Path) -> Result<Vec<Cell>> {
    fs::read_to_string(path)?
        .split_whitespace()
        .map(str::parse)
        .collect()
}
