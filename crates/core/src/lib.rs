#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod lesson;
pub mod model;

pub use catalog::{LessonModule, ModuleCatalog, SUPPORTED_COUNTRIES};
pub use error::Error;
pub use lesson::{LessonDeck, LessonPager};
