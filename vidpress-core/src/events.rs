//! Event surface for transcode jobs.
//!
//! A job reports back exclusively through events: callers register handlers
//! on an [`EventDispatcher`] and receive progress, warnings, and the final
//! outcome in arrival order. Warnings cover malformed diagnostic lines from
//! the encoder; they are non-fatal and the job keeps running.

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscodeEvent {
    /// Encoded time over total duration. Not clamped; a malformed duration
    /// can push this outside [0, 1].
    Progress { fraction: f64 },

    /// Unparseable or premature diagnostic line; the line was skipped.
    Warning { message: String },

    /// The encoder exited with status zero.
    Completed,

    /// Spawned process failed: non-zero exit, signal, or cancellation.
    Failed { message: String },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &TranscodeEvent);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: TranscodeEvent) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<TranscodeEvent>>);

    impl EventHandler for Recorder {
        fn handle(&self, event: &TranscodeEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_dispatcher_fans_out_in_order() {
        let first = Arc::new(Recorder(Mutex::new(Vec::new())));
        let second = Arc::new(Recorder(Mutex::new(Vec::new())));

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(first.clone());
        dispatcher.add_handler(second.clone());

        dispatcher.emit(TranscodeEvent::Progress { fraction: 0.25 });
        dispatcher.emit(TranscodeEvent::Completed);

        let expected = vec![
            TranscodeEvent::Progress { fraction: 0.25 },
            TranscodeEvent::Completed,
        ];
        assert_eq!(*first.0.lock().unwrap(), expected);
        assert_eq!(*second.0.lock().unwrap(), expected);
    }

    #[test]
    fn test_dispatcher_with_no_handlers_is_a_no_op() {
        let dispatcher = EventDispatcher::default();
        dispatcher.emit(TranscodeEvent::Warning {
            message: "No duration found".to_string(),
        });
    }
}
