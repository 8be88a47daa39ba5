//! The set of lesson modules shown on the home screen.

mod content;

use std::sync::Arc;

use thiserror::Error;

use crate::lesson::{CompletionRoute, DeckError, LessonDeck, NarrationMode, StageCurve};
use crate::model::{IdError, ModuleKey, ModuleOrdinal};

/// Countries with lesson content. Selecting any other country is refused.
pub const SUPPORTED_COUNTRIES: &[&str] = &["United Arab Emirates"];

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown module {0}")]
    UnknownModule(u32),

    #[error("duplicate module ordinal {0}")]
    DuplicateOrdinal(u32),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// A topic on the home screen together with its lesson deck.
#[derive(Debug, Clone)]
pub struct LessonModule {
    ordinal: ModuleOrdinal,
    deck: Arc<LessonDeck>,
}

impl LessonModule {
    #[must_use]
    pub fn new(ordinal: ModuleOrdinal, deck: LessonDeck) -> Self {
        Self {
            ordinal,
            deck: Arc::new(deck),
        }
    }

    #[must_use]
    pub fn ordinal(&self) -> ModuleOrdinal {
        self.ordinal
    }

    #[must_use]
    pub fn key(&self) -> &ModuleKey {
        self.deck.module_key()
    }

    #[must_use]
    pub fn deck(&self) -> Arc<LessonDeck> {
        Arc::clone(&self.deck)
    }
}

/// Ordered list of modules; ordinals are unique.
#[derive(Debug, Clone)]
pub struct ModuleCatalog {
    modules: Vec<LessonModule>,
}

impl ModuleCatalog {
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateOrdinal` if two modules share an ordinal.
    pub fn new(mut modules: Vec<LessonModule>) -> Result<Self, CatalogError> {
        modules.sort_by_key(LessonModule::ordinal);
        for pair in modules.windows(2) {
            if pair[0].ordinal == pair[1].ordinal {
                return Err(CatalogError::DuplicateOrdinal(pair[0].ordinal.value()));
            }
        }
        Ok(Self { modules })
    }

    /// The five United Arab Emirates topics.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a built-in table is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        let fact = |key: &str, pages: &[&str]| -> Result<LessonDeck, CatalogError> {
            Ok(LessonDeck::new(ModuleKey::new(key)?, pages.iter().copied())?
                .with_stages(StageCurve::seedling())?)
        };

        let culture = fact("Culture", content::CULTURE)?.with_completion(
            CompletionRoute::Stay,
            "You've completed the culture learning session!",
        );
        let currency = fact("Currency", content::CURRENCY)?.with_completion(
            CompletionRoute::Stay,
            "You've completed the UAE currency learning session!",
        );
        let emergency = fact("Emergency", content::EMERGENCY)?.with_completion(
            CompletionRoute::Stay,
            "You've completed the emergency contacts learning session!",
        );
        let travel = fact("Travel", content::TRAVEL)?.with_completion(
            CompletionRoute::ReturnToCaller,
            "You've completed the travel requirements learning session!",
        );
        let greetings = LessonDeck::new(ModuleKey::new("Greetings")?, content::GREETINGS.iter().copied())?
            .with_stages(StageCurve::Linear)?
            .with_narration(NarrationMode::PronunciationLine)
            .with_completion(
                CompletionRoute::NavigateHome,
                "You've completed the greetings learning session!",
            );

        let decks = [culture, currency, emergency, travel, greetings];
        let mut modules = Vec::with_capacity(decks.len());
        for (ordinal, deck) in (1_u32..).zip(decks) {
            modules.push(LessonModule::new(ModuleOrdinal::new(ordinal)?, deck));
        }
        Self::new(modules)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::UnknownModule` if no module has this ordinal.
    pub fn get(&self, ordinal: ModuleOrdinal) -> Result<&LessonModule, CatalogError> {
        self.modules
            .iter()
            .find(|module| module.ordinal == ordinal)
            .ok_or(CatalogError::UnknownModule(ordinal.value()))
    }

    #[must_use]
    pub fn find_key(&self, key: &ModuleKey) -> Option<&LessonModule> {
        self.modules.iter().find(|module| module.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LessonModule> {
        self.modules.iter()
    }

    /// Denominator of the overall-progress fraction.
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.modules.len()).unwrap_or(u32::MAX)
    }
}

/// Whether lesson content exists for `country`.
#[must_use]
pub fn is_supported_country(country: &str) -> bool {
    SUPPORTED_COUNTRIES.contains(&country.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_ordered_modules() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let keys: Vec<_> = catalog.iter().map(|m| m.key().as_str().to_owned()).collect();
        assert_eq!(
            keys,
            ["Culture", "Currency", "Emergency", "Travel", "Greetings"]
        );
        assert_eq!(catalog.total(), 5);
    }

    #[test]
    fn greetings_narrates_pronunciation_and_goes_home() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let greetings = catalog.get(ModuleOrdinal::new(5).unwrap()).unwrap();
        let deck = greetings.deck();
        assert_eq!(deck.len(), 15);
        assert_eq!(deck.narration(), NarrationMode::PronunciationLine);
        assert_eq!(deck.completion(), CompletionRoute::NavigateHome);
        assert_eq!(deck.stages(), &StageCurve::Linear);
    }

    #[test]
    fn unknown_ordinal_is_reported() {
        let catalog = ModuleCatalog::builtin().unwrap();
        let err = catalog.get(ModuleOrdinal::new(9).unwrap()).unwrap_err();
        assert_eq!(err, CatalogError::UnknownModule(9));
    }

    #[test]
    fn duplicate_ordinals_are_rejected() {
        let deck = LessonDeck::new(ModuleKey::new("A").unwrap(), ["x"]).unwrap();
        let one = ModuleOrdinal::new(1).unwrap();
        let err = ModuleCatalog::new(vec![
            LessonModule::new(one, deck.clone()),
            LessonModule::new(one, deck),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateOrdinal(1));
    }

    #[test]
    fn only_uae_is_supported() {
        assert!(is_supported_country("United Arab Emirates"));
        assert!(!is_supported_country("France"));
    }
}
