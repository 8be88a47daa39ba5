//! Celebratory animation + sound played once a lesson's last page is acknowledged.

use std::fmt;
use std::time::Duration;

use tokio::sync::oneshot;

/// Starts a celebration and hands back a guard that owns its resources.
pub trait CelebrationPresenter: Send + Sync {
    fn play(&self) -> Celebration;
}

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// A running celebration.
///
/// Resources are released exactly once: by `release`, or on drop if the
/// lesson is torn down first.
pub struct Celebration {
    finished: Option<oneshot::Receiver<()>>,
    release: Option<ReleaseHook>,
}

impl Celebration {
    /// `finished` resolves when the animation's duration has elapsed.
    #[must_use]
    pub fn new(finished: oneshot::Receiver<()>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            finished: Some(finished),
            release: Some(Box::new(release)),
        }
    }

    /// A celebration with nothing to play, already finished.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            finished: None,
            release: None,
        }
    }

    /// Waits for the animation to end. A dropped sender counts as the end.
    pub async fn finished(&mut self) {
        if let Some(finished) = self.finished.take() {
            // The presenter may be torn down before signalling; either way it is over.
            let _ = finished.await;
        }
    }

    /// Releases the animation and sound. Returns `false` if already released.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Celebration {
    fn drop(&mut self) {
        if self.release() {
            log::debug!("celebration released before it finished");
        }
    }
}

impl fmt::Debug for Celebration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Celebration")
            .field("pending", &self.finished.is_some())
            .field("released", &self.is_released())
            .finish()
    }
}

/// Plays for a fixed duration on the tokio runtime.
///
/// Must be used from within a runtime.
#[derive(Debug, Clone, Copy)]
pub struct TimedCelebration {
    duration: Duration,
}

impl TimedCelebration {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1_500);

    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for TimedCelebration {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION)
    }
}

impl CelebrationPresenter for TimedCelebration {
    fn play(&self) -> Celebration {
        let (done, finished) = oneshot::channel();
        let duration = self.duration;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = done.send(());
        });
        log::debug!("celebration started for {duration:?}");
        Celebration::new(finished, move || timer.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn release_runs_once() {
        let releases = Arc::new(AtomicUsize::new(0));
        let (_tx, rx) = oneshot::channel();
        let counter = Arc::clone(&releases);
        let mut celebration = Celebration::new(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(celebration.release());
        assert!(!celebration.release());
        drop(celebration);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn drop_releases_unfinished_celebration() {
        let releases = Arc::new(AtomicUsize::new(0));
        let (_tx, rx) = oneshot::channel();
        let counter = Arc::clone(&releases);
        let celebration = Celebration::new(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(celebration);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_celebration_finishes_after_duration() {
        let presenter = TimedCelebration::new(Duration::from_millis(800));
        let started = tokio::time::Instant::now();
        let mut celebration = presenter.play();
        celebration.finished().await;
        assert!(started.elapsed() >= Duration::from_millis(800));
        assert!(celebration.release());
    }

    #[tokio::test]
    async fn immediate_celebration_is_already_over() {
        let mut celebration = Celebration::immediate();
        celebration.finished().await;
        assert!(celebration.is_released());
        assert!(!celebration.release());
    }
}
