/// Console adapters for the run log
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
