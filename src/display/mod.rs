//! Read-only views of analysis results for renderers and logs.
pub mod report;
pub mod trace;

pub use report::AnalysisReport;
pub use trace::format_trace;
