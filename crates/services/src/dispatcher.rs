use std::sync::Arc;

use culture_core::ModuleCatalog;
use culture_core::model::{CountryName, ModuleKey, ModuleOrdinal, OverallProgress, Percent, UserId};
use storage::repository::{ProgressStore, StorageError};
use tokio::task::JoinHandle;

use crate::celebration::CelebrationPresenter;
use crate::error::{DispatchError, ProgressWriteError};
use crate::lesson::LessonSession;
use crate::narration::NarratorFactory;

/// One affordance on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeEntry {
    pub ordinal: ModuleOrdinal,
    pub key: ModuleKey,
}

/// Outcome of the two independent progress writes issued when a module opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleWrites {
    /// Stored `completedModule` after ratcheting to this module's ordinal.
    pub completed_module: Result<u32, StorageError>,
    /// Country the module was marked 100% for.
    pub module_progress: Result<CountryName, ProgressWriteError>,
}

/// Progress writes still running in the background.
///
/// Dropping this does not cancel them.
#[derive(Debug)]
pub struct PendingWrites {
    task: JoinHandle<ModuleWrites>,
}

impl PendingWrites {
    /// Waits for both writes to settle.
    pub async fn settled(self) -> ModuleWrites {
        match self.task.await {
            Ok(writes) => writes,
            Err(err) => {
                let err = StorageError::WriteFailed(format!("progress task ended: {err}"));
                ModuleWrites {
                    completed_module: Err(err.clone()),
                    module_progress: Err(err.into()),
                }
            }
        }
    }
}

/// A freshly opened lesson plus the progress writes it triggered.
pub struct OpenedModule {
    pub session: LessonSession,
    pub writes: PendingWrites,
}

/// Home screen coordinator: lists modules, opens them and records that they were opened.
#[derive(Clone)]
pub struct ModuleDispatcher {
    catalog: Arc<ModuleCatalog>,
    progress: Arc<dyn ProgressStore>,
    narrators: Arc<dyn NarratorFactory>,
    celebrations: Arc<dyn CelebrationPresenter>,
}

impl ModuleDispatcher {
    #[must_use]
    pub fn new(
        catalog: Arc<ModuleCatalog>,
        progress: Arc<dyn ProgressStore>,
        narrators: Arc<dyn NarratorFactory>,
        celebrations: Arc<dyn CelebrationPresenter>,
    ) -> Self {
        Self {
            catalog,
            progress,
            narrators,
            celebrations,
        }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<HomeEntry> {
        self.catalog
            .iter()
            .map(|module| HomeEntry {
                ordinal: module.ordinal(),
                key: module.key().clone(),
            })
            .collect()
    }

    /// `completedModule / totalModules`, or 0 when there is no record or the read fails.
    pub async fn overall_progress(&self, user: &UserId) -> OverallProgress {
        match self.progress.read_user(user).await {
            Ok(record) => record.overall(self.catalog.total()),
            Err(StorageError::NotFound) => OverallProgress::NONE,
            Err(err) => {
                log::warn!("failed to restore overall progress: {err}");
                OverallProgress::NONE
            }
        }
    }

    /// Opens the module's lesson, then ratchets `completedModule` and marks the
    /// module 100% for the selected country in the background.
    ///
    /// The lesson is returned without waiting on the store. The two writes are
    /// independent: either may fail without undoing the other. Must be called
    /// from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Catalog` for an unknown module.
    pub fn open_module(
        &self,
        user: &UserId,
        ordinal: ModuleOrdinal,
    ) -> Result<OpenedModule, DispatchError> {
        let module = self.catalog.get(ordinal)?;
        let session = LessonSession::open(
            user.clone(),
            module,
            self.narrators.as_ref(),
            Arc::clone(&self.celebrations),
            Arc::clone(&self.progress),
        );

        let progress = Arc::clone(&self.progress);
        let user = user.clone();
        let key = module.key().clone();
        let task = tokio::spawn(async move {
            let (completed_module, module_progress) = tokio::join!(
                progress.ratchet_completed_module(&user, ordinal.value()),
                mark_opened(progress.as_ref(), &user, &key),
            );

            if let Err(err) = &completed_module {
                log::warn!("error updating overall progress: {err}");
            }
            match &module_progress {
                Ok(country) => log::info!("{key} progress updated for {country}"),
                Err(err) => log::warn!("{key} progress not saved: {err}"),
            }
            ModuleWrites {
                completed_module,
                module_progress,
            }
        });

        Ok(OpenedModule {
            session,
            writes: PendingWrites { task },
        })
    }
}

async fn mark_opened(
    progress: &dyn ProgressStore,
    user: &UserId,
    key: &ModuleKey,
) -> Result<CountryName, ProgressWriteError> {
    let country = match progress.read_user(user).await {
        Ok(record) => record.selected_country,
        Err(StorageError::NotFound) => None,
        Err(err) => return Err(err.into()),
    };
    let country = country.ok_or(ProgressWriteError::NoCountrySelected)?;

    progress
        .set_module_progress(user, &country, key, Percent::COMPLETE)
        .await?;
    Ok(country)
}
