use std::sync::Arc;

use culture_core::LessonModule;
use culture_core::lesson::{CompletionRoute, LessonPager, PageView, PagerError, PagerPhase, Step};
use culture_core::model::{ModuleKey, ModuleOrdinal, UserId};
use storage::repository::{ProgressStore, StorageError};

use crate::celebration::{Celebration, CelebrationPresenter};
use crate::error::LessonError;
use crate::narration::{Narration, NarratorFactory};

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// What the front end should do after a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep {
    /// Redraw with this page.
    Page(PageView),
    /// Nothing to redraw.
    Unchanged,
    /// The celebration is playing; await `LessonSession::await_celebration`.
    Celebrating,
}

/// Result of the one-shot completion side effect.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub route: CompletionRoute,
    pub message: String,
    /// Stored `completedModule` after the ratchet, or why it was not saved.
    pub completed_module: Result<u32, StorageError>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One opened lesson screen: pager plus its narrator, celebration and progress sink.
///
/// At most one utterance is active at a time: every navigation and every
/// read-aloud request interrupts the previous one first.
pub struct LessonSession {
    user: UserId,
    ordinal: ModuleOrdinal,
    pager: LessonPager,
    narration: Narration,
    presenter: Arc<dyn CelebrationPresenter>,
    progress: Arc<dyn ProgressStore>,
    celebration: Option<Celebration>,
}

impl LessonSession {
    /// Opens `module` on its first page.
    ///
    /// A narrator that fails to initialise only disables `read_aloud`.
    #[must_use]
    pub fn open(
        user: UserId,
        module: &LessonModule,
        narrators: &dyn NarratorFactory,
        presenter: Arc<dyn CelebrationPresenter>,
        progress: Arc<dyn ProgressStore>,
    ) -> Self {
        log::debug!("opening lesson {} for {user}", module.key());
        Self {
            user,
            ordinal: module.ordinal(),
            pager: LessonPager::new(module.deck()),
            narration: Narration::from_factory(narrators),
            presenter,
            progress,
            celebration: None,
        }
    }

    #[must_use]
    pub fn module_key(&self) -> &ModuleKey {
        self.pager.deck().module_key()
    }

    #[must_use]
    pub fn ordinal(&self) -> ModuleOrdinal {
        self.ordinal
    }

    #[must_use]
    pub fn phase(&self) -> PagerPhase {
        self.pager.phase()
    }

    #[must_use]
    pub fn pager(&self) -> &LessonPager {
        &self.pager
    }

    #[must_use]
    pub fn view(&self) -> PageView {
        self.pager.view()
    }

    #[must_use]
    pub fn narration_available(&self) -> bool {
        self.narration.is_available()
    }

    /// Advances one page, or starts the celebration from the last page.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Pager` if the lesson is celebrating or finished.
    pub fn next(&mut self) -> Result<SessionStep, LessonError> {
        self.ensure_browsing()?;
        self.narration.interrupt();
        match self.pager.next()? {
            Step::Moved(view) => Ok(SessionStep::Page(view)),
            Step::Unchanged => Ok(SessionStep::Unchanged),
            Step::CompletionStarted => {
                log::debug!("lesson {} reached its last page", self.module_key());
                self.celebration = Some(self.presenter.play());
                Ok(SessionStep::Celebrating)
            }
        }
    }

    /// Goes back one page. On the first page this does nothing at all.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Pager` if the lesson is celebrating or finished.
    pub fn previous(&mut self) -> Result<SessionStep, LessonError> {
        self.ensure_browsing()?;
        if self.pager.current_index() == 0 {
            return Ok(SessionStep::Unchanged);
        }
        self.narration.interrupt();
        match self.pager.previous()? {
            Step::Moved(view) => Ok(SessionStep::Page(view)),
            Step::Unchanged | Step::CompletionStarted => Ok(SessionStep::Unchanged),
        }
    }

    /// Narrates the current page, interrupting any earlier utterance.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::NarrationUnavailable` when there is no narrator
    /// (pagination keeps working), or `LessonError::Pager` once finished.
    pub fn read_aloud(&mut self) -> Result<(), LessonError> {
        if self.pager.is_finished() {
            return Err(PagerError::Finished.into());
        }
        let deck = self.pager.deck();
        let utterance = deck.narration().utterance(self.pager.current_page());
        self.narration.say(utterance)?;
        Ok(())
    }

    /// Waits for the celebration to end, then runs the completion side effect once:
    /// ratchet `completedModule` to this module's ordinal and report where to go next.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Pager` if no celebration is pending.
    pub async fn await_celebration(&mut self) -> Result<CompletionOutcome, LessonError> {
        match self.pager.phase() {
            PagerPhase::Completing => {}
            PagerPhase::Browsing(_) => return Err(PagerError::NotCompleting.into()),
            PagerPhase::Finished => return Err(PagerError::Finished.into()),
        }

        let mut celebration = self.celebration.take().unwrap_or_else(Celebration::immediate);
        celebration.finished().await;
        celebration.release();
        self.pager.finish_celebration()?;
        self.narration.shutdown();

        let completed_module = self
            .progress
            .ratchet_completed_module(&self.user, self.ordinal.value())
            .await;
        match &completed_module {
            Ok(stored) => log::info!(
                "{} completed by {}; completedModule is {stored}",
                self.module_key(),
                self.user
            ),
            Err(err) => log::warn!("saving completion of {} failed: {err}", self.module_key()),
        }

        let deck = self.pager.deck();
        Ok(CompletionOutcome {
            route: deck.completion(),
            message: deck.completion_message().to_owned(),
            completed_module,
        })
    }

    /// Leaves the lesson without celebrating. Safe to call more than once.
    pub fn exit(&mut self) {
        self.narration.interrupt();
        if self.pager.exit() {
            log::debug!("left lesson {}", self.module_key());
        }
        self.teardown();
    }

    fn ensure_browsing(&self) -> Result<(), PagerError> {
        match self.pager.phase() {
            PagerPhase::Browsing(_) => Ok(()),
            PagerPhase::Completing => Err(PagerError::CompletionInProgress),
            PagerPhase::Finished => Err(PagerError::Finished),
        }
    }

    fn teardown(&mut self) {
        if let Some(mut celebration) = self.celebration.take() {
            celebration.release();
        }
        self.narration.shutdown();
    }
}

impl Drop for LessonSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
