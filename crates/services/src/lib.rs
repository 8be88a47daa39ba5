#![forbid(unsafe_code)]

pub mod app_services;
pub mod celebration;
pub mod country;
pub mod dispatcher;
pub mod error;
pub mod lesson;
pub mod narration;
pub mod profile;

pub use app_services::AppServices;
pub use celebration::{Celebration, CelebrationPresenter, TimedCelebration};
pub use country::CountryService;
pub use dispatcher::{HomeEntry, ModuleDispatcher, ModuleWrites, OpenedModule, PendingWrites};
pub use error::{
    AppServicesError, CountryError, DispatchError, LessonError, ProfileError, ProgressWriteError,
};
pub use lesson::{CompletionOutcome, LessonSession, SessionStep};
pub use narration::{NarrationUnavailable, Narrator, NarratorFactory, NoNarration};
pub use profile::{ModuleProgressEntry, ProfileOverview, ProfileService};
