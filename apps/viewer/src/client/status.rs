/// Single-slot notification surface. Every write replaces the previous message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReporter {
    message: String,
}

impl StatusReporter {
    pub fn report(&mut self, message: impl Into<String>) {
        self.message = message.into();
        tracing::debug!(status = %self.message, "status updated");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
