//! Normalizes every input modality into the same few intents.
//!
//! Click, drag and drop, touch and keyboard adapters only ever produce
//! [`InputEvent`]s; whatever path the user takes, [`InputUnifier::handle`]
//! reduces it to selecting a square, dropping the selection, or committing a
//! move. Nothing here touches game state: the caller decides what an intent
//! does and whether input is accepted at all.

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        use NavKey::*;
        Some(match key {
            "ArrowUp" => Up,
            "ArrowDown" => Down,
            "ArrowLeft" => Left,
            "ArrowRight" => Right,
            "Enter" | " " => Enter,
            "Escape" => Escape,
            _ => return None,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Click(Square),
    DragStart(Square),
    Drop(Square),
    DragEnd,
    TouchStart(Square),
    TouchMove(Option<Square>),
    TouchEnd(Option<Square>),
    TouchCancel,
    Key(NavKey),
}

impl InputEvent {
    /// Events that can only finish a gesture, never start one.
    pub const fn ends_gesture(self) -> bool {
        matches!(self, Self::DragEnd | Self::TouchEnd(_) | Self::TouchCancel)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Select(Square),
    Deselect,
    Commit(MoveIntent),
}

/// What the unifier needs to know about the game to interpret an event.
#[derive(Copy, Clone, Debug)]
pub struct InputContext<'a> {
    pub board: &'a BoardSnapshot,
    pub selected: Option<Square>,
    pub orientation: Orientation,
}

/// Per-modality transient state: drag and touch origins, touch hover, and
/// the keyboard focus cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputUnifier {
    drag_origin: Option<Square>,
    touch_origin: Option<Square>,
    hover: Option<Square>,
    cursor: Option<Square>,
}

impl InputUnifier {
    pub fn hover(&self) -> Option<Square> {
        self.hover
    }

    pub fn cursor(&self) -> Option<Square> {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some() || self.touch_origin.is_some()
    }

    /// Forgets in-progress gestures, the focus cursor survives.
    pub fn reset(&mut self) {
        self.drag_origin = None;
        self.touch_origin = None;
        self.hover = None;
    }

    pub fn handle(&mut self, event: InputEvent, ctx: &InputContext<'_>) -> Option<Intent> {
        use InputEvent::*;

        log::trace!("input: {:?}", event);
        match event {
            Click(square) => {
                self.cursor = Some(square);
                Self::click(square, ctx)
            }
            DragStart(square) => {
                if !ctx.board.is_occupied(square) {
                    return None;
                }
                self.drag_origin = Some(square);
                self.cursor = Some(square);
                (ctx.selected != Some(square)).then_some(Intent::Select(square))
            }
            Drop(target) => {
                let origin = self.drag_origin.take()?;
                self.cursor = Some(target);
                MoveIntent::new(origin, target).map(Intent::Commit)
            }
            DragEnd => {
                self.drag_origin = None;
                None
            }
            TouchStart(square) => {
                self.hover = Some(square);
                self.cursor = Some(square);
                match ctx.selected {
                    Some(selected) if selected == square => {
                        self.touch_origin = Some(square);
                        None
                    }
                    // a tap elsewhere finishes a tap-tap move like a click
                    Some(selected) => MoveIntent::new(selected, square).map(Intent::Commit),
                    None if ctx.board.is_occupied(square) => {
                        self.touch_origin = Some(square);
                        Some(Intent::Select(square))
                    }
                    None => None,
                }
            }
            TouchMove(square) => {
                if self.touch_origin.is_some() {
                    self.hover = square;
                }
                None
            }
            TouchEnd(target) => {
                self.hover = None;
                let origin = self.touch_origin.take()?;
                let target = target?;
                self.cursor = Some(target);
                MoveIntent::new(origin, target).map(Intent::Commit)
            }
            TouchCancel => {
                self.touch_origin = None;
                self.hover = None;
                None
            }
            Key(key) => self.key(key, ctx),
        }
    }

    fn click(square: Square, ctx: &InputContext<'_>) -> Option<Intent> {
        match ctx.selected {
            Some(selected) if selected == square => Some(Intent::Deselect),
            Some(selected) => MoveIntent::new(selected, square).map(Intent::Commit),
            None if ctx.board.is_occupied(square) => Some(Intent::Select(square)),
            None => None,
        }
    }

    fn key(&mut self, key: NavKey, ctx: &InputContext<'_>) -> Option<Intent> {
        use NavKey::*;

        let cursor = self
            .cursor
            .or(ctx.selected)
            .unwrap_or_else(|| ctx.orientation.corner());

        // screen directions, flipped when black sits at the bottom
        let sign = match ctx.orientation {
            Orientation::White => 1,
            Orientation::Black => -1,
        };
        let step = match key {
            Up => (0, sign),
            Down => (0, -sign),
            Left => (-sign, 0),
            Right => (sign, 0),
            Enter => {
                self.cursor = Some(cursor);
                return Self::click(cursor, ctx);
            }
            Escape => return ctx.selected.map(|_| Intent::Deselect),
        };

        // first arrow press only reveals the cursor
        let next = match self.cursor {
            None => cursor,
            Some(_) => cursor.offset(step.0, step.1).unwrap_or(cursor),
        };
        self.cursor = Some(next);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::initial_square_map;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn board() -> BoardSnapshot {
        BoardSnapshot::from_square_map(&initial_square_map()).unwrap()
    }

    /// Feeds events the way the session does: intents update the selection.
    fn run(events: &[InputEvent]) -> (alloc::vec::Vec<Intent>, Option<Square>) {
        let board = board();
        let mut unifier = InputUnifier::default();
        let mut selected = None;
        let mut intents = alloc::vec::Vec::new();

        for &event in events {
            let ctx = InputContext {
                board: &board,
                selected,
                orientation: Orientation::White,
            };
            if let Some(intent) = unifier.handle(event, &ctx) {
                selected = match intent {
                    Intent::Select(square) => Some(square),
                    Intent::Deselect | Intent::Commit(_) => None,
                };
                intents.push(intent);
            }
        }
        (intents, selected)
    }

    fn commit(from: &str, to: &str) -> Intent {
        Intent::Commit(MoveIntent::new(sq(from), sq(to)).unwrap())
    }

    #[test]
    fn click_then_click_commits_once() {
        use InputEvent::*;
        let (intents, _) = run(&[Click(sq("e2")), Click(sq("e4"))]);
        assert_eq!(intents, [Intent::Select(sq("e2")), commit("e2", "e4")]);
    }

    #[test]
    fn clicking_empty_square_without_selection_does_nothing() {
        use InputEvent::*;
        let (intents, selected) = run(&[Click(sq("e4"))]);
        assert!(intents.is_empty());
        assert_eq!(selected, None);
    }

    #[test]
    fn reclicking_selected_square_deselects() {
        use InputEvent::*;
        let (intents, selected) = run(&[Click(sq("e2")), Click(sq("e2"))]);
        assert_eq!(intents, [Intent::Select(sq("e2")), Intent::Deselect]);
        assert_eq!(selected, None);
    }

    #[test]
    fn drag_and_drop_commits_once() {
        use InputEvent::*;
        let (intents, _) = run(&[DragStart(sq("g1")), Drop(sq("f3")), DragEnd]);
        assert_eq!(intents, [Intent::Select(sq("g1")), commit("g1", "f3")]);
    }

    #[test]
    fn drop_on_origin_is_a_no_op() {
        use InputEvent::*;
        let (intents, selected) = run(&[DragStart(sq("g1")), Drop(sq("g1")), DragEnd]);
        assert_eq!(intents, [Intent::Select(sq("g1"))]);
        assert_eq!(selected, Some(sq("g1")));
    }

    #[test]
    fn drag_from_empty_square_is_ignored() {
        use InputEvent::*;
        let (intents, _) = run(&[DragStart(sq("e4")), Drop(sq("e5"))]);
        assert!(intents.is_empty());
    }

    #[test]
    fn touch_drag_commits_once_and_hover_is_transient() {
        use InputEvent::*;
        let board = board();
        let mut unifier = InputUnifier::default();
        let ctx = InputContext {
            board: &board,
            selected: None,
            orientation: Orientation::White,
        };
        assert_eq!(
            unifier.handle(TouchStart(sq("d2")), &ctx),
            Some(Intent::Select(sq("d2")))
        );

        let ctx = InputContext {
            selected: Some(sq("d2")),
            ..ctx
        };
        assert_eq!(unifier.handle(TouchMove(Some(sq("d3"))), &ctx), None);
        assert_eq!(unifier.hover(), Some(sq("d3")));
        assert_eq!(unifier.handle(TouchMove(Some(sq("d4"))), &ctx), None);
        assert_eq!(
            unifier.handle(TouchEnd(Some(sq("d4"))), &ctx),
            Some(commit("d2", "d4"))
        );
        assert_eq!(unifier.hover(), None);
    }

    #[test]
    fn touch_tap_then_tap_commits() {
        use InputEvent::*;
        let (intents, _) = run(&[
            TouchStart(sq("e2")),
            TouchEnd(Some(sq("e2"))),
            TouchStart(sq("e4")),
            TouchEnd(Some(sq("e4"))),
        ]);
        assert_eq!(intents, [Intent::Select(sq("e2")), commit("e2", "e4")]);
    }

    #[test]
    fn touch_end_off_board_commits_nothing() {
        use InputEvent::*;
        let (intents, selected) = run(&[TouchStart(sq("e2")), TouchEnd(None)]);
        assert_eq!(intents, [Intent::Select(sq("e2"))]);
        assert_eq!(selected, Some(sq("e2")));
    }

    #[test]
    fn keyboard_navigation_then_enter() {
        use InputEvent::*;
        use NavKey::*;
        let (intents, _) = run(&[
            Key(Right), // cursor appears on a1
            Key(Right),
            Key(Right),
            Key(Right),
            Key(Right), // e1
            Key(Up),    // e2
            Key(Enter),
            Key(Up),
            Key(Up), // e4
            Key(Enter),
        ]);
        assert_eq!(intents, [Intent::Select(sq("e2")), commit("e2", "e4")]);
    }

    #[test]
    fn arrows_never_change_selection_and_clamp_at_edges() {
        use InputEvent::*;
        use NavKey::*;
        let board = board();
        let mut unifier = InputUnifier::default();
        let ctx = InputContext {
            board: &board,
            selected: None,
            orientation: Orientation::White,
        };
        for key in [Left, Left, Down, Down] {
            assert_eq!(unifier.handle(Key(key), &ctx), None);
        }
        assert_eq!(unifier.cursor(), Some(sq("a1")));
    }

    #[test]
    fn arrows_follow_black_orientation() {
        use InputEvent::*;
        use NavKey::*;
        let board = board();
        let mut unifier = InputUnifier::default();
        let ctx = InputContext {
            board: &board,
            selected: None,
            orientation: Orientation::Black,
        };
        unifier.handle(Key(Up), &ctx);
        assert_eq!(unifier.cursor(), Some(sq("h8")));
        unifier.handle(Key(Up), &ctx);
        assert_eq!(unifier.cursor(), Some(sq("h7")));
        unifier.handle(Key(Right), &ctx);
        assert_eq!(unifier.cursor(), Some(sq("g7")));
    }

    #[test]
    fn modalities_mix_freely() {
        use InputEvent::*;
        use NavKey::*;
        // drag-start selects, keyboard commits from the drop-less drag
        let (intents, _) = run(&[
            DragStart(sq("e2")),
            DragEnd,
            Key(Up),
            Key(Up),
            Key(Enter),
        ]);
        assert_eq!(intents, [Intent::Select(sq("e2")), commit("e2", "e4")]);

        // click selects, touch commits
        let (intents, _) = run(&[Click(sq("b1")), TouchStart(sq("c3"))]);
        assert_eq!(intents, [Intent::Select(sq("b1")), commit("b1", "c3")]);
    }

    #[test]
    fn escape_drops_selection() {
        use InputEvent::*;
        let (intents, selected) = run(&[Click(sq("e2")), Key(NavKey::Escape)]);
        assert_eq!(intents, [Intent::Select(sq("e2")), Intent::Deselect]);
        assert_eq!(selected, None);
    }

    #[test]
    fn nav_keys_from_dom_names() {
        assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::Left));
        assert_eq!(NavKey::from_key("Enter"), Some(NavKey::Enter));
        assert_eq!(NavKey::from_key("a"), None);
    }
}
