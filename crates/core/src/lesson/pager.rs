use std::sync::Arc;

use thiserror::Error;

use super::deck::LessonDeck;
use super::view::{AdvanceLabel, AnimationSpan, Direction, PageIndicator, PageView};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PagerError {
    #[error("lesson is celebrating its completion")]
    CompletionInProgress,

    #[error("lesson has not reached its completion transition")]
    NotCompleting,

    #[error("lesson is finished")]
    Finished,
}

/// Lifecycle of one opened lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    Browsing(usize),
    Completing,
    Finished,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The cursor moved; the page must be redrawn.
    Moved(PageView),
    /// Nothing changed (e.g. `previous` on the first page).
    Unchanged,
    /// `next` on the last page: the celebration must start now.
    CompletionStarted,
}

/// Pages through a fixed deck and tracks the completion transition.
///
/// Navigation is synchronous and side-effect free; narration, celebration and
/// persistence are driven by the caller from the returned `Step`.
#[derive(Debug, Clone)]
pub struct LessonPager {
    deck: Arc<LessonDeck>,
    current: usize,
    previous: usize,
    phase: PagerPhase,
}

impl LessonPager {
    /// Opens the deck on its first page.
    #[must_use]
    pub fn new(deck: impl Into<Arc<LessonDeck>>) -> Self {
        Self {
            deck: deck.into(),
            current: 0,
            previous: 0,
            phase: PagerPhase::Browsing(0),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &LessonDeck {
        &self.deck
    }

    #[must_use]
    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn previous_index(&self) -> usize {
        self.previous
    }

    #[must_use]
    pub fn current_page(&self) -> &str {
        &self.deck.pages()[self.current]
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.current + 1 == self.deck.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == PagerPhase::Finished
    }

    /// Moves one page forward, or enters `Completing` from the last page.
    ///
    /// # Errors
    ///
    /// Returns `PagerError::CompletionInProgress` or `PagerError::Finished`
    /// when the lesson is no longer browsing.
    pub fn next(&mut self) -> Result<Step, PagerError> {
        self.ensure_browsing()?;
        if self.is_last_page() {
            self.phase = PagerPhase::Completing;
            return Ok(Step::CompletionStarted);
        }
        self.move_to(self.current + 1);
        Ok(Step::Moved(self.view()))
    }

    /// Moves one page back. A no-op on the first page.
    ///
    /// # Errors
    ///
    /// Returns `PagerError::CompletionInProgress` or `PagerError::Finished`
    /// when the lesson is no longer browsing.
    pub fn previous(&mut self) -> Result<Step, PagerError> {
        self.ensure_browsing()?;
        if self.current == 0 {
            return Ok(Step::Unchanged);
        }
        self.move_to(self.current - 1);
        Ok(Step::Moved(self.view()))
    }

    /// `Completing -> Finished` once the celebration reports it is done.
    ///
    /// # Errors
    ///
    /// Returns `PagerError::NotCompleting` while browsing and
    /// `PagerError::Finished` if already finished.
    pub fn finish_celebration(&mut self) -> Result<(), PagerError> {
        match self.phase {
            PagerPhase::Completing => {
                self.phase = PagerPhase::Finished;
                Ok(())
            }
            PagerPhase::Browsing(_) => Err(PagerError::NotCompleting),
            PagerPhase::Finished => Err(PagerError::Finished),
        }
    }

    /// Leaves the lesson from any state without celebrating.
    ///
    /// Returns `false` if the lesson was already finished.
    pub fn exit(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.phase = PagerPhase::Finished;
        true
    }

    /// Builds the view model for the current page.
    #[must_use]
    pub fn view(&self) -> PageView {
        let total = self.deck.len();
        let stages = self.deck.stages();
        let low = self.previous.min(self.current);
        let high = self.previous.max(self.current);

        PageView {
            index: self.current,
            total,
            text: self.current_page().to_owned(),
            indicator: PageIndicator::new(total, self.current),
            animation: AnimationSpan {
                start: stages.stage(low, total),
                end: stages.stage(high, total),
                direction: Direction::between(self.previous, self.current),
            },
            previous_enabled: self.current > 0,
            advance: if self.is_last_page() {
                AdvanceLabel::Done
            } else {
                AdvanceLabel::Next
            },
        }
    }

    fn ensure_browsing(&self) -> Result<(), PagerError> {
        match self.phase {
            PagerPhase::Browsing(_) => Ok(()),
            PagerPhase::Completing => Err(PagerError::CompletionInProgress),
            PagerPhase::Finished => Err(PagerError::Finished),
        }
    }

    fn move_to(&mut self, index: usize) {
        self.previous = self.current;
        self.current = index;
        self.phase = PagerPhase::Browsing(index);
    }
}
