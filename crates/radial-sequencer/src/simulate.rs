//! Synthesizes pointer click triplets.
//!
//! An `EventSimulator` turns a click request into down/up/commit signals and hands
//! each one to a [`Poster`]. Posting is fire-and-forget: the host decides what the
//! signals do.

use std::{fmt, sync::Arc};

use tracing::{info, trace, warn};

use crate::{
    dom::{ElementId, MenuDom},
    geom::Point,
};

/// Which pointer button a click emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left/primary button.
    Primary,
    /// Right/secondary button, used to open context menus.
    Secondary,
}

impl Button {
    /// Value of the `buttons` bitmask field carried by each signal.
    pub const fn code(self) -> u16 {
        match self {
            Self::Primary => 1,
            Self::Secondary => 2,
        }
    }
}

/// The kind of a single synthesized signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// `mousedown`
    Down,
    /// `mouseup`
    Up,
    /// `click`, the commit signal of a primary click.
    Click,
    /// `contextmenu`, the commit signal of a secondary click.
    ContextMenu,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Down => "mousedown",
            Self::Up => "mouseup",
            Self::Click => "click",
            Self::ContextMenu => "contextmenu",
        })
    }
}

/// One synthesized pointer signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSignal {
    /// Signal kind.
    pub kind: SignalKind,
    /// Viewport coordinates.
    pub at: Point,
    /// Button emulated by the click this signal belongs to.
    pub button: Button,
    /// Whether the signal bubbles up the tree. Always true for synthesized clicks.
    pub bubbles: bool,
    /// Whether the host may cancel the default action. Always true for synthesized clicks.
    pub cancelable: bool,
}

impl PointerSignal {
    /// A bubbling, cancelable signal.
    pub const fn new(kind: SignalKind, at: Point, button: Button) -> Self {
        Self {
            kind,
            at,
            button,
            bubbles: true,
            cancelable: true,
        }
    }
}

/// Delivers synthesized signals to an element in the host UI.
pub trait Poster: Send + Sync {
    /// Dispatch `signal` on `target`.
    fn post(&self, target: ElementId, signal: &PointerSignal);
}

/// Stateless click synthesizer over a [`Poster`].
#[derive(Clone)]
pub struct EventSimulator {
    /// Signal sink.
    poster: Arc<dyn Poster>,
}

impl EventSimulator {
    /// Create a simulator that posts through `poster`.
    pub fn new(poster: Arc<dyn Poster>) -> Self {
        Self { poster }
    }

    /// Emit a down/up/commit triplet at `at` on `target`.
    ///
    /// The commit signal is `contextmenu` for [`Button::Secondary`] and `click` for
    /// [`Button::Primary`].
    pub fn simulate_click(&self, target: ElementId, at: Point, button: Button) {
        let commit = match button {
            Button::Primary => SignalKind::Click,
            Button::Secondary => SignalKind::ContextMenu,
        };
        for kind in [SignalKind::Down, SignalKind::Up, commit] {
            let signal = PointerSignal::new(kind, at, button);
            trace!(element = %target, kind = %kind, x = at.x, y = at.y, "post_signal");
            self.poster.post(target, &signal);
        }
    }

    /// Right-click whatever is topmost at `at`.
    ///
    /// Returns the element that received the click, or `None` if the hit-test found
    /// nothing and no signals were sent.
    pub fn right_click_at(&self, dom: &dyn MenuDom, at: Point) -> Option<ElementId> {
        let Some(target) = dom.element_at(at) else {
            warn!(x = at.x, y = at.y, "right_click_no_element");
            return None;
        };
        self.simulate_click(target, at, Button::Secondary);
        info!(element = %target, x = at.x, y = at.y, "simulated_right_click");
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        dom::{Element, LeafKey},
        geom::Rect,
    };

    #[derive(Default)]
    struct RecordingPoster(Mutex<Vec<(ElementId, PointerSignal)>>);

    impl RecordingPoster {
        fn kinds(&self) -> Vec<SignalKind> {
            self.0.lock().iter().map(|(_, s)| s.kind).collect()
        }
    }

    impl Poster for RecordingPoster {
        fn post(&self, target: ElementId, signal: &PointerSignal) {
            self.0.lock().push((target, *signal));
        }
    }

    struct OneElement;

    impl MenuDom for OneElement {
        fn element_at(&self, at: Point) -> Option<ElementId> {
            Rect::new(0.0, 0.0, 100.0, 100.0)
                .contains(at)
                .then_some(ElementId(7))
        }
        fn category(&self, _name: &str) -> Option<Element> {
            None
        }
        fn leaf(&self, _key: &LeafKey) -> Option<Element> {
            None
        }
    }

    #[test]
    fn primary_click_is_down_up_click() {
        let poster = Arc::new(RecordingPoster::default());
        let sim = EventSimulator::new(poster.clone());
        sim.simulate_click(ElementId(1), Point::new(5.0, 6.0), Button::Primary);
        assert_eq!(
            poster.kinds(),
            vec![SignalKind::Down, SignalKind::Up, SignalKind::Click]
        );
        for (target, s) in poster.0.lock().iter() {
            assert_eq!(*target, ElementId(1));
            assert_eq!(s.button.code(), 1);
            assert_eq!(s.at, Point::new(5.0, 6.0));
            assert!(s.bubbles && s.cancelable);
        }
    }

    #[test]
    fn secondary_click_commits_with_contextmenu() {
        let poster = Arc::new(RecordingPoster::default());
        let sim = EventSimulator::new(poster.clone());
        sim.simulate_click(ElementId(1), Point::new(0.0, 0.0), Button::Secondary);
        assert_eq!(
            poster.kinds(),
            vec![SignalKind::Down, SignalKind::Up, SignalKind::ContextMenu]
        );
        assert!(poster.0.lock().iter().all(|(_, s)| s.button.code() == 2));
    }

    #[test]
    fn right_click_targets_hit_tested_element() {
        let poster = Arc::new(RecordingPoster::default());
        let sim = EventSimulator::new(poster.clone());
        assert_eq!(
            sim.right_click_at(&OneElement, Point::new(50.0, 50.0)),
            Some(ElementId(7))
        );
        assert!(poster.0.lock().iter().all(|(t, _)| *t == ElementId(7)));
    }

    #[test]
    fn right_click_outside_posts_nothing() {
        let poster = Arc::new(RecordingPoster::default());
        let sim = EventSimulator::new(poster.clone());
        assert_eq!(sim.right_click_at(&OneElement, Point::new(500.0, 50.0)), None);
        assert!(poster.kinds().is_empty());
    }
}
