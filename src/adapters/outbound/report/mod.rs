/// Analysis report adapters
mod analysis_report;

pub use analysis_report::JsonAnalysisReport;
