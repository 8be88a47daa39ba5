#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use culture_core::model::{CountryName, CountryProgress, ModuleKey, Percent, UserId, UserProgress};
use services::{Celebration, CelebrationPresenter, NarrationUnavailable, Narrator, NarratorFactory};
use storage::repository::{InMemoryProgressStore, ProgressStore, StorageError};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spoken {
    Speak(String),
    Stop,
    Shutdown,
}

/// Speech engine double that stays "speaking" until stopped.
#[derive(Default)]
pub struct RecordingNarrator {
    events: Mutex<Vec<Spoken>>,
    speaking: AtomicBool,
}

impl RecordingNarrator {
    pub fn events(&self) -> Vec<Spoken> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn push(&self, event: Spoken) {
        self.events.lock().unwrap().push(event);
    }
}

impl Narrator for RecordingNarrator {
    fn speak(&self, text: &str, _flush: bool) {
        self.speaking.store(true, Ordering::SeqCst);
        self.push(Spoken::Speak(text.to_owned()));
    }

    fn stop(&self) {
        self.speaking.store(false, Ordering::SeqCst);
        self.push(Spoken::Stop);
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    fn shutdown(&self) {
        self.push(Spoken::Shutdown);
    }
}

/// Hands out the same recording narrator to every lesson.
#[derive(Default, Clone)]
pub struct SharedNarrator(pub Arc<RecordingNarrator>);

impl NarratorFactory for SharedNarrator {
    fn create(&self) -> Result<Arc<dyn Narrator>, NarrationUnavailable> {
        let narrator: Arc<dyn Narrator> = self.0.clone();
        Ok(narrator)
    }
}

/// Celebration double. Finishes at once unless `hold` is set, in which case the
/// test decides when it ends through `finish`.
#[derive(Default)]
pub struct CountingPresenter {
    hold: bool,
    plays: AtomicUsize,
    releases: Arc<AtomicUsize>,
    pending: Mutex<Option<oneshot::Sender<()>>>,
}

impl CountingPresenter {
    pub fn holding() -> Self {
        Self {
            hold: true,
            ..Self::default()
        }
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn finish(&self) {
        if let Some(done) = self.pending.lock().unwrap().take() {
            let _ = done.send(());
        }
    }
}

impl CelebrationPresenter for CountingPresenter {
    fn play(&self) -> Celebration {
        self.plays.fetch_add(1, Ordering::SeqCst);
        let (done, finished) = oneshot::channel();
        if self.hold {
            *self.pending.lock().unwrap() = Some(done);
        } else {
            let _ = done.send(());
        }
        let releases = Arc::clone(&self.releases);
        Celebration::new(finished, move || {
            releases.fetch_add(1, Ordering::SeqCst);
        })
    }
}

/// How one store operation misbehaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fault {
    #[default]
    None,
    Fail,
    /// Never completes.
    Stall,
}

/// In-memory store with per-operation faults.
#[derive(Clone, Default)]
pub struct FaultyStore {
    pub inner: InMemoryProgressStore,
    pub read_user: Fault,
    pub ratchet: Fault,
    pub set_module_progress: Fault,
}

impl FaultyStore {
    async fn gate(fault: Fault, err: StorageError) -> Result<(), StorageError> {
        match fault {
            Fault::None => Ok(()),
            Fault::Fail => Err(err),
            Fault::Stall => std::future::pending().await,
        }
    }
}

#[async_trait]
impl ProgressStore for FaultyStore {
    async fn read_user(&self, user: &UserId) -> Result<UserProgress, StorageError> {
        Self::gate(self.read_user, StorageError::ReadFailed("offline".into())).await?;
        self.inner.read_user(user).await
    }

    async fn ratchet_completed_module(
        &self,
        user: &UserId,
        candidate: u32,
    ) -> Result<u32, StorageError> {
        Self::gate(self.ratchet, StorageError::WriteFailed("offline".into())).await?;
        self.inner.ratchet_completed_module(user, candidate).await
    }

    async fn set_module_progress(
        &self,
        user: &UserId,
        country: &CountryName,
        module: &ModuleKey,
        percent: Percent,
    ) -> Result<(), StorageError> {
        Self::gate(self.set_module_progress, StorageError::WriteFailed("offline".into())).await?;
        self.inner.set_module_progress(user, country, module, percent).await
    }

    async fn read_country_progress(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<CountryProgress, StorageError> {
        self.inner.read_country_progress(user, country).await
    }

    async fn set_selected_country(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<(), StorageError> {
        self.inner.set_selected_country(user, country).await
    }
}
