pub mod archive;
pub mod contest;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod markup;
pub mod model;
pub mod output;
pub mod problem;
mod tasks;
pub mod usaco;

pub use error::{Error, Result};
pub use fetch::{Fetch, HttpClient};
pub use model::{ContestResult, Level, PipelineOutput, Problem, TestCase};
pub use output::{read_output, write_output};
pub use usaco::{UsacoScraper, UsacoScraperBuilder, DEFAULT_BASE_URL};
