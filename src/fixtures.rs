#[cfg(test)]
pub mod test {
    use std::sync::{Arc, Mutex};

    use crate::reporter::Reporter;

    /// Captures `(message, is_error)` pairs for assertions.
    ///
    /// Clones share the same buffer, so a clone can be handed to the
    /// registry while the test keeps the original to inspect.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingReporter {
        messages: Arc<Mutex<Vec<(String, bool)>>>,
    }

    impl RecordingReporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn messages(&self) -> Vec<(String, bool)> {
            self.messages.lock().unwrap().clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, is_error)| *is_error)
                .map(|(message, _)| message.clone())
                .collect()
        }
    }

    impl Reporter for RecordingReporter {
        fn report(&self, message: &str, is_error: bool) {
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), is_error));
        }
    }

    #[test]
    fn recording_reporter_separates_errors() {
        let reporter = RecordingReporter::new();
        reporter.report("fine", false);
        reporter.report("broken", true);
        assert_eq!(reporter.messages().len(), 2);
        assert_eq!(reporter.errors(), vec!["broken".to_string()]);
    }
}
