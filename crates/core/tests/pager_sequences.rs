use culture_core::lesson::{AdvanceLabel, LessonDeck, LessonPager, PageMark, PagerPhase, Step};
use culture_core::model::ModuleKey;

fn deck(pages: usize) -> LessonDeck {
    LessonDeck::new(
        ModuleKey::new("Culture").unwrap(),
        (0..pages).map(|i| format!("page {i}")),
    )
    .unwrap()
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Next,
    Previous,
}

fn ops_from_mask(mask: u32, len: u32) -> Vec<Op> {
    (0..len)
        .map(|bit| if mask & (1 << bit) == 0 { Op::Next } else { Op::Previous })
        .collect()
}

#[test]
fn every_navigation_sequence_stays_in_bounds() {
    for pages in 1..=5_usize {
        for len in 0..=8_u32 {
            for mask in 0..(1_u32 << len) {
                let mut pager = LessonPager::new(deck(pages));
                for op in ops_from_mask(mask, len) {
                    let before = pager.current_index();
                    let step = match op {
                        Op::Next => pager.next().unwrap(),
                        Op::Previous => pager.previous().unwrap(),
                    };

                    assert!(pager.current_index() < pages);
                    match step {
                        Step::Moved(view) => {
                            assert_eq!(pager.previous_index(), before);
                            assert_eq!(before.abs_diff(pager.current_index()), 1);
                            assert_eq!(view.indicator.marks().len(), pages);
                            let current = view
                                .indicator
                                .marks()
                                .iter()
                                .filter(|mark| **mark == PageMark::Current)
                                .count();
                            assert_eq!(current, 1);
                            assert_eq!(view.indicator.current(), Some(view.index));
                            assert_eq!(view.previous_enabled, view.index > 0);
                        }
                        Step::Unchanged => {
                            assert_eq!(before, 0);
                            assert_eq!(pager.current_index(), 0);
                        }
                        Step::CompletionStarted => {
                            assert_eq!(before, pages - 1);
                            assert_eq!(pager.current_index(), pages - 1);
                            assert_eq!(pager.phase(), PagerPhase::Completing);
                            break;
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn n_minus_one_nexts_reach_last_page_then_complete() {
    for pages in 1..=6_usize {
        let mut pager = LessonPager::new(deck(pages));
        for _ in 0..pages - 1 {
            assert!(matches!(pager.next().unwrap(), Step::Moved(_)));
        }
        assert_eq!(pager.phase(), PagerPhase::Browsing(pages - 1));
        assert_eq!(pager.view().advance, AdvanceLabel::Done);

        assert_eq!(pager.next().unwrap(), Step::CompletionStarted);
        assert_eq!(pager.current_index(), pages - 1);
    }
}

#[test]
fn done_label_only_on_last_page() {
    let mut pager = LessonPager::new(
        LessonDeck::new(ModuleKey::new("Culture").unwrap(), ["A", "B", "C"]).unwrap(),
    );
    let mut labels = vec![pager.view().advance];
    while let Step::Moved(view) = pager.next().unwrap() {
        labels.push(view.advance);
    }
    assert_eq!(
        labels,
        [AdvanceLabel::Next, AdvanceLabel::Next, AdvanceLabel::Done]
    );
}
