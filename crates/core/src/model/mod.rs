mod ids;
mod progress;

pub use ids::{IdError, ModuleKey, ModuleOrdinal, UserId};
pub use progress::{
    CountryName, CountryProgress, OverallProgress, Percent, ProgressError, UserProgress,
};
