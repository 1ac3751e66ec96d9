/// ProgressReporter port for the human-readable run log
///
/// This port abstracts where the run log goes (e.g., stderr) so the
/// trimming pipeline can report per-dependency steps, type sections and the
/// final summary without knowing about the terminal.
pub trait ProgressReporter {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports a titled block, e.g. the ALL TYPES section of a dependency
    ///
    /// # Arguments
    /// * `title` - Section heading
    /// * `body` - Section content
    fn report_section(&self, title: &str, body: &str) {
        self.report(&format!("{}\n{}", title, body));
    }

    /// Reports progress over a known number of steps
    ///
    /// # Arguments
    /// * `current` - Steps finished so far
    /// * `total` - Total number of steps
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    ///
    /// # Arguments
    /// * `message` - Completion message, usually the run summary
    fn report_completion(&self, message: &str);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_section(&self, title: &str, body: &str) {
        (**self).report_section(title, body)
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        (**self).report_progress(current, total, message)
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
