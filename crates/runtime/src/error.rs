use crate::channels::Subscription;

/// Failure reported by a per-frame callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackError {
    pub message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CallbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CallbackError {}

/// A callback failure annotated with where it was registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickError {
    pub frame_index: u64,
    pub channel: String,
    pub subscription: Subscription,
    pub error: CallbackError,
}

impl std::fmt::Display for TickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame {}: callback {} in channel {:?} failed: {}",
            self.frame_index, self.subscription.0, self.channel, self.error
        )
    }
}

impl std::error::Error for TickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
