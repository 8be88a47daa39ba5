mod support;

use std::sync::Arc;

use culture_core::ModuleCatalog;
use culture_core::lesson::{AdvanceLabel, CompletionRoute, PagerError, PagerPhase};
use culture_core::model::{ModuleOrdinal, UserId};
use services::{LessonError, LessonSession, NoNarration, SessionStep};
use storage::repository::{InMemoryProgressStore, ProgressStore, StorageError};

use support::{CountingPresenter, Fault, FaultyStore, SharedNarrator, Spoken};

struct Fixture {
    store: InMemoryProgressStore,
    narrator: SharedNarrator,
    presenter: Arc<CountingPresenter>,
}

impl Fixture {
    fn new(presenter: CountingPresenter) -> Self {
        Self {
            store: InMemoryProgressStore::new(),
            narrator: SharedNarrator::default(),
            presenter: Arc::new(presenter),
        }
    }

    fn open(&self, ordinal: u32) -> LessonSession {
        let catalog = ModuleCatalog::builtin().unwrap();
        let module = catalog.get(ModuleOrdinal::new(ordinal).unwrap()).unwrap();
        LessonSession::open(
            user(),
            module,
            &self.narrator,
            self.presenter.clone(),
            Arc::new(self.store.clone()),
        )
    }
}

fn user() -> UserId {
    UserId::new("learner").unwrap()
}

#[tokio::test]
async fn culture_lesson_runs_to_completion_once() {
    let fx = Fixture::new(CountingPresenter::default());
    let mut session = fx.open(1);
    assert_eq!(session.view().index, 0);
    assert!(!session.view().previous_enabled);

    for expected in 1..4 {
        match session.next().unwrap() {
            SessionStep::Page(view) => assert_eq!(view.index, expected),
            other => panic!("expected a page, got {other:?}"),
        }
    }
    assert_eq!(session.view().advance, AdvanceLabel::Done);
    assert_eq!(fx.presenter.plays(), 0);

    assert_eq!(session.next().unwrap(), SessionStep::Celebrating);
    assert_eq!(session.phase(), PagerPhase::Completing);
    assert!(matches!(
        session.next(),
        Err(LessonError::Pager(PagerError::CompletionInProgress))
    ));

    let outcome = session.await_celebration().await.unwrap();
    assert_eq!(outcome.route, CompletionRoute::Stay);
    assert_eq!(outcome.message, "You've completed the culture learning session!");
    assert_eq!(outcome.completed_module, Ok(1));
    assert_eq!(fx.presenter.plays(), 1);
    assert_eq!(fx.presenter.releases(), 1);

    assert!(matches!(
        session.await_celebration().await,
        Err(LessonError::Pager(PagerError::Finished))
    ));
    assert!(matches!(session.next(), Err(LessonError::Pager(PagerError::Finished))));
    assert_eq!(fx.presenter.plays(), 1);
    assert_eq!(fx.store.read_user(&user()).await.unwrap().completed_module, 1);
}

#[tokio::test]
async fn completion_never_lowers_completed_module() {
    let fx = Fixture::new(CountingPresenter::default());
    fx.store.ratchet_completed_module(&user(), 4).await.unwrap();

    let mut session = fx.open(2);
    while session.next().unwrap() != SessionStep::Celebrating {}
    let outcome = session.await_celebration().await.unwrap();
    assert_eq!(outcome.completed_module, Ok(4));
}

#[tokio::test]
async fn routes_follow_the_topic() {
    let fx = Fixture::new(CountingPresenter::default());

    let mut travel = fx.open(4);
    while travel.next().unwrap() != SessionStep::Celebrating {}
    assert_eq!(
        travel.await_celebration().await.unwrap().route,
        CompletionRoute::ReturnToCaller
    );

    let mut greetings = fx.open(5);
    while greetings.next().unwrap() != SessionStep::Celebrating {}
    assert_eq!(
        greetings.await_celebration().await.unwrap().route,
        CompletionRoute::NavigateHome
    );
}

#[tokio::test]
async fn greetings_reads_only_the_pronunciation() {
    let fx = Fixture::new(CountingPresenter::default());
    let mut session = fx.open(5);
    session.read_aloud().unwrap();
    assert_eq!(
        fx.narrator.0.events(),
        [Spoken::Speak("Salam Alaikum".into())]
    );
}

#[tokio::test]
async fn read_aloud_interrupts_the_previous_utterance() {
    let fx = Fixture::new(CountingPresenter::default());
    let mut session = fx.open(1);
    session.read_aloud().unwrap();
    session.read_aloud().unwrap();

    let page = session.pager().current_page().to_owned();
    assert_eq!(
        fx.narrator.0.events(),
        [
            Spoken::Speak(page.clone()),
            Spoken::Stop,
            Spoken::Speak(page),
        ]
    );
}

#[tokio::test]
async fn navigation_stops_speech() {
    let fx = Fixture::new(CountingPresenter::default());
    let mut session = fx.open(1);
    session.read_aloud().unwrap();
    session.next().unwrap();
    session.read_aloud().unwrap();
    session.previous().unwrap();

    let events = fx.narrator.0.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[1], Spoken::Stop);
    assert_eq!(events[3], Spoken::Stop);
}

#[tokio::test]
async fn previous_on_first_page_changes_nothing() {
    let fx = Fixture::new(CountingPresenter::default());
    let mut session = fx.open(1);
    session.read_aloud().unwrap();
    fx.narrator.0.clear();

    assert_eq!(session.previous().unwrap(), SessionStep::Unchanged);
    assert_eq!(session.view().index, 0);
    assert!(fx.narrator.0.events().is_empty());
}

#[tokio::test]
async fn missing_narrator_only_disables_read_aloud() {
    let fx = Fixture::new(CountingPresenter::default());
    let catalog = ModuleCatalog::builtin().unwrap();
    let module = catalog.get(ModuleOrdinal::new(3).unwrap()).unwrap();
    let mut session = LessonSession::open(
        user(),
        module,
        &NoNarration,
        fx.presenter.clone(),
        Arc::new(fx.store.clone()),
    );

    assert!(!session.narration_available());
    assert!(matches!(
        session.read_aloud(),
        Err(LessonError::NarrationUnavailable(_))
    ));
    assert!(matches!(session.next().unwrap(), SessionStep::Page(_)));
}

#[tokio::test]
async fn exit_mid_celebration_releases_everything() {
    let fx = Fixture::new(CountingPresenter::holding());
    let mut session = fx.open(1);
    while session.next().unwrap() != SessionStep::Celebrating {}
    assert_eq!(fx.presenter.releases(), 0);

    session.exit();
    session.exit();
    assert_eq!(fx.presenter.releases(), 1);
    assert_eq!(session.phase(), PagerPhase::Finished);
    assert_eq!(fx.narrator.0.events(), [Spoken::Shutdown]);
    assert_eq!(fx.store.read_user(&user()).await, Err(StorageError::NotFound));
}

#[tokio::test]
async fn held_celebration_completes_when_finished() {
    let fx = Fixture::new(CountingPresenter::holding());
    let mut session = fx.open(3);
    while session.next().unwrap() != SessionStep::Celebrating {}

    fx.presenter.finish();
    let outcome = session.await_celebration().await.unwrap();
    assert_eq!(outcome.completed_module, Ok(3));
    assert_eq!(fx.presenter.releases(), 1);
}

#[tokio::test]
async fn dropping_a_session_shuts_the_narrator_down() {
    let fx = Fixture::new(CountingPresenter::holding());
    let mut session = fx.open(2);
    session.read_aloud().unwrap();
    while session.next().unwrap() != SessionStep::Celebrating {}
    fx.narrator.0.clear();

    drop(session);
    assert_eq!(fx.presenter.releases(), 1);
    assert_eq!(fx.narrator.0.events(), [Spoken::Shutdown]);
}

#[tokio::test]
async fn failed_completion_write_still_finishes_the_lesson() {
    let presenter = Arc::new(CountingPresenter::default());
    let store = FaultyStore {
        ratchet: Fault::Fail,
        ..FaultyStore::default()
    };
    let catalog = ModuleCatalog::builtin().unwrap();
    let module = catalog.get(ModuleOrdinal::new(1).unwrap()).unwrap();
    let mut session = LessonSession::open(
        user(),
        module,
        &SharedNarrator::default(),
        presenter.clone(),
        Arc::new(store.clone()),
    );
    while session.next().unwrap() != SessionStep::Celebrating {}

    let outcome = session.await_celebration().await.unwrap();
    assert_eq!(
        outcome.completed_module,
        Err(StorageError::WriteFailed("offline".into()))
    );
    assert_eq!(outcome.route, CompletionRoute::Stay);
    assert_eq!(session.phase(), PagerPhase::Finished);
    assert_eq!(presenter.releases(), 1);
    assert_eq!(store.inner.read_user(&user()).await, Err(StorageError::NotFound));
}
