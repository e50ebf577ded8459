pub(crate) mod apply;
pub(crate) mod extract;

/// Result of running a command.
pub struct CommandResult {
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}

impl CommandResult {
    /// A result with nothing to report.
    pub fn clean() -> Self {
        Self {
            error_count: 0,
            warning_count: 0,
            exit_on_errors: true,
        }
    }
}
