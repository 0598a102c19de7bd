pub mod csv_file;
pub mod simulated;

use anyhow::Result;

use crate::engine::DecisionMatrix;

pub use csv_file::CsvSource;
pub use simulated::SimulatedSource;

/// Anything that can produce a decision matrix for one ranking run.
pub trait MatrixSource {
    fn name(&self) -> &str;
    fn load(&self) -> Result<DecisionMatrix>;
}
