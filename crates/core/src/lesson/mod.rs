//! Paged lesson decks and the navigation state machine that walks them.

mod deck;
mod pager;
mod view;

pub use deck::{CompletionRoute, DeckError, LessonDeck, NarrationMode, StageCurve};
pub use pager::{LessonPager, PagerError, PagerPhase, Step};
pub use view::{AdvanceLabel, AnimationSpan, Direction, PageIndicator, PageMark, PageView};
