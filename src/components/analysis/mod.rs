mod component;
mod sections;
mod types;

pub use component::AnalysisResults;
pub use types::AnalysisResult;
