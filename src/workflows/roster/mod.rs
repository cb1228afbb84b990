mod parser;

use std::io::Read;
use std::path::Path;

/// One raw roster row: the grid of trimmed cell values for a single patient.
/// Rows are read-only inputs; blank and absent cells read the same.
#[derive(Debug, Clone, Default)]
pub struct RosterRow {
    cells: Vec<String>,
}

impl RosterRow {
    pub fn from_cells(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// The cell at `column`, or `None` when the column is absent or blank.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads the patient roster grid from CSV. The first row is the header and
/// is never returned; columns are positional.
pub struct PatientRoster;

impl PatientRoster {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RosterRow>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RosterRow>, RosterImportError> {
        Ok(parser::parse_rows(reader)?)
    }
}
