use thiserror::Error;

use crate::model::ModuleKey;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Construction-time violations of a lesson deck. Fatal to opening the lesson.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("lesson deck must contain at least one page")]
    EmptyPages,

    #[error("stage table has {stages} entries but the deck has {pages} pages")]
    StageCountMismatch { stages: usize, pages: usize },

    #[error("animation stage {index} must be within [0, 1], got {value}")]
    StageOutOfRange { index: usize, value: f32 },
}

//
// ─── PRESENTATION KNOBS ────────────────────────────────────────────────────────
//

/// Maps a page index onto the growth animation's progress axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StageCurve {
    /// One explicit stage per page.
    Fixed(Vec<f32>),
    /// Evenly spread from 0.0 on the first page to 1.0 on the last.
    #[default]
    Linear,
}

impl StageCurve {
    /// The stage table shared by the fact-style topics.
    #[must_use]
    pub fn seedling() -> Self {
        Self::Fixed(vec![0.0, 0.11, 0.22, 0.33])
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn stage(&self, index: usize, pages: usize) -> f32 {
        match self {
            StageCurve::Fixed(stages) => stages.get(index).copied().unwrap_or(0.0),
            StageCurve::Linear => {
                if pages <= 1 {
                    0.0
                } else {
                    index as f32 / (pages - 1) as f32
                }
            }
        }
    }

    fn validate(&self, pages: usize) -> Result<(), DeckError> {
        let StageCurve::Fixed(stages) = self else {
            return Ok(());
        };
        if stages.len() != pages {
            return Err(DeckError::StageCountMismatch {
                stages: stages.len(),
                pages,
            });
        }
        for (index, value) in stages.iter().copied().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DeckError::StageOutOfRange { index, value });
            }
        }
        Ok(())
    }
}

/// Which part of a page is handed to the narrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationMode {
    #[default]
    WholePage,
    /// Third line of the page: "<native>\n<translation>\n<pronunciation>".
    PronunciationLine,
}

impl NarrationMode {
    #[must_use]
    pub fn utterance<'a>(&self, page: &'a str) -> &'a str {
        match self {
            NarrationMode::WholePage => page,
            NarrationMode::PronunciationLine => page.split('\n').nth(2).unwrap_or("").trim(),
        }
    }
}

/// Where control goes once the celebration for a finished lesson ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionRoute {
    /// Keep the lesson open behind the congratulation message.
    #[default]
    Stay,
    /// Close the lesson and hand control back to whoever opened it.
    ReturnToCaller,
    /// Close the lesson and jump to the home screen.
    NavigateHome,
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// Immutable ordered set of lesson pages for one module.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDeck {
    module_key: ModuleKey,
    pages: Vec<String>,
    stages: StageCurve,
    narration: NarrationMode,
    completion: CompletionRoute,
    completion_message: String,
}

impl LessonDeck {
    /// Creates a deck with linear stages, whole-page narration and `CompletionRoute::Stay`.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::EmptyPages` if `pages` is empty.
    pub fn new<I, S>(module_key: ModuleKey, pages: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        if pages.is_empty() {
            return Err(DeckError::EmptyPages);
        }
        let completion_message = format!(
            "You've completed the {} learning session!",
            module_key.as_str().to_lowercase()
        );
        Ok(Self {
            module_key,
            pages,
            stages: StageCurve::default(),
            narration: NarrationMode::default(),
            completion: CompletionRoute::default(),
            completion_message,
        })
    }

    /// Replaces the animation stage curve.
    ///
    /// # Errors
    ///
    /// Returns `DeckError` if a fixed table does not have one in-range stage per page.
    pub fn with_stages(mut self, stages: StageCurve) -> Result<Self, DeckError> {
        stages.validate(self.pages.len())?;
        self.stages = stages;
        Ok(self)
    }

    #[must_use]
    pub fn with_narration(mut self, narration: NarrationMode) -> Self {
        self.narration = narration;
        self
    }

    #[must_use]
    pub fn with_completion(mut self, route: CompletionRoute, message: impl Into<String>) -> Self {
        self.completion = route;
        self.completion_message = message.into();
        self
    }

    #[must_use]
    pub fn module_key(&self) -> &ModuleKey {
        &self.module_key
    }

    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Number of pages. Always >= 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[must_use]
    pub fn stages(&self) -> &StageCurve {
        &self.stages
    }

    #[must_use]
    pub fn narration(&self) -> NarrationMode {
        self.narration
    }

    #[must_use]
    pub fn completion(&self) -> CompletionRoute {
        self.completion
    }

    #[must_use]
    pub fn completion_message(&self) -> &str {
        &self.completion_message
    }
}
