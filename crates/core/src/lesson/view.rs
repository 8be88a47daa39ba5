use std::fmt;

/// One mark of the page indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMark {
    Current,
    Other,
}

/// Sequence of N marks with exactly one `PageMark::Current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndicator(Vec<PageMark>);

impl PageIndicator {
    pub(crate) fn new(total: usize, current: usize) -> Self {
        Self(
            (0..total)
                .map(|index| {
                    if index == current {
                        PageMark::Current
                    } else {
                        PageMark::Other
                    }
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn marks(&self) -> &[PageMark] {
        &self.0
    }

    /// Position of the distinguished mark.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.0.iter().position(|mark| *mark == PageMark::Current)
    }
}

impl fmt::Display for PageIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, mark) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(match mark {
                PageMark::Current => "●",
                PageMark::Other => "○",
            })?;
        }
        Ok(())
    }
}

/// Direction the growth animation plays in after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Still,
}

impl Direction {
    pub(crate) fn between(previous: usize, current: usize) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::Still,
        }
    }

    /// Playback speed sign: 1, -1 or 0.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
            Direction::Still => 0,
        }
    }
}

/// Bounds of the growth animation, `start <= end`, plus playback direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpan {
    pub start: f32,
    pub end: f32,
    pub direction: Direction,
}

/// Label of the advance affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceLabel {
    Next,
    Done,
}

impl fmt::Display for AdvanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdvanceLabel::Next => "Next",
            AdvanceLabel::Done => "Done",
        })
    }
}

/// Everything a front end needs to draw the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub indicator: PageIndicator,
    pub animation: AnimationSpan,
    pub previous_enabled: bool,
    pub advance: AdvanceLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_renders_dots() {
        let indicator = PageIndicator::new(3, 1);
        assert_eq!(indicator.to_string(), "○ ● ○");
        assert_eq!(indicator.current(), Some(1));
    }

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::between(0, 1).sign(), 1);
        assert_eq!(Direction::between(2, 1).sign(), -1);
        assert_eq!(Direction::between(0, 0).sign(), 0);
    }
}
