//! Text-to-speech seam.

use std::sync::Arc;

use thiserror::Error;

/// The speech engine could not be initialised; reading aloud is disabled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("narration unavailable: {reason}")]
pub struct NarrationUnavailable {
    pub reason: String,
}

impl NarrationUnavailable {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A stateful speech engine. Calls return immediately; speech runs in the background.
pub trait Narrator: Send + Sync {
    /// Start speaking `text`. With `flush`, anything queued or playing is dropped first.
    fn speak(&self, text: &str, flush: bool);

    fn stop(&self);

    fn is_speaking(&self) -> bool;

    /// Release the engine. No calls are made after this.
    fn shutdown(&self);
}

/// Creates one narrator per opened lesson.
pub trait NarratorFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns `NarrationUnavailable` if the engine fails to initialise.
    fn create(&self) -> Result<Arc<dyn Narrator>, NarrationUnavailable>;
}

/// Factory for setups without speech output.
#[derive(Debug, Clone, Default)]
pub struct NoNarration;

impl NarratorFactory for NoNarration {
    fn create(&self) -> Result<Arc<dyn Narrator>, NarrationUnavailable> {
        Err(NarrationUnavailable::new("narration disabled"))
    }
}

/// A lesson's narrator, or the reason it has none.
pub(crate) enum Narration {
    Ready(Arc<dyn Narrator>),
    Unavailable(NarrationUnavailable),
    Shutdown,
}

impl Narration {
    pub(crate) fn from_factory(factory: &dyn NarratorFactory) -> Self {
        match factory.create() {
            Ok(narrator) => Narration::Ready(narrator),
            Err(err) => {
                log::warn!("{err}; read-aloud disabled for this lesson");
                Narration::Unavailable(err)
            }
        }
    }

    pub(crate) fn is_available(&self) -> bool {
        matches!(self, Narration::Ready(_))
    }

    /// Stops the current utterance, if any.
    pub(crate) fn interrupt(&self) {
        if let Narration::Ready(narrator) = self {
            if narrator.is_speaking() {
                narrator.stop();
            }
        }
    }

    /// Interrupts, then speaks `text` as the only active utterance.
    pub(crate) fn say(&self, text: &str) -> Result<(), NarrationUnavailable> {
        match self {
            Narration::Ready(narrator) => {
                self.interrupt();
                if text.is_empty() {
                    log::debug!("nothing to narrate on this page");
                    return Ok(());
                }
                narrator.speak(text, true);
                Ok(())
            }
            Narration::Unavailable(err) => {
                log::warn!("read-aloud requested but {err}");
                Err(err.clone())
            }
            Narration::Shutdown => Err(NarrationUnavailable::new("lesson closed")),
        }
    }

    /// Stops and releases the engine. Idempotent.
    pub(crate) fn shutdown(&mut self) {
        if let Narration::Ready(narrator) = self {
            if narrator.is_speaking() {
                narrator.stop();
            }
            narrator.shutdown();
            *self = Narration::Shutdown;
        }
    }
}
