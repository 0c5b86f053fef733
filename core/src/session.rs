//! One game session: phase, board, selection, timer and the single
//! outstanding engine request.
//!
//! The session never talks to the network. Operations that need the engine
//! hand back a [`Request`]; the caller performs it and feeds the outcome to
//! [`Session::complete`]. Every request carries a [`Ticket`], and a reply
//! whose ticket is no longer the pending one (because `reset`, `start` or
//! `quit` superseded it) is dropped.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use gambit_protocol::{
    BoardResponse, Difficulty, Endpoint, LegalMovesResponse, MoveResponse, SquareMap,
    StatusCategory,
};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    PreGame,
    Active,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u32,
    serial: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineCall {
    Start(Difficulty),
    Move(MoveIntent),
    LegalMoves(Square),
    Undo,
    Reset,
}

impl EngineCall {
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Start(_) => Endpoint::Start,
            Self::Move(_) => Endpoint::Move,
            Self::LegalMoves(_) => Endpoint::LegalMoves,
            Self::Undo => Endpoint::Undo,
            Self::Reset => Endpoint::Reset,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub ticket: Ticket,
    pub call: EngineCall,
}

/// Successful engine answer, shaped by the call that produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Board(BoardResponse),
    Moved(MoveResponse),
    Destinations(LegalMovesResponse),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Rejected,
    Transport,
    Integrity,
}

/// User-visible, dismissable error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl From<&EngineError> for Notice {
    fn from(err: &EngineError) -> Self {
        let kind = match err {
            EngineError::Rejected(_) => NoticeKind::Rejected,
            EngineError::Transport(_) => NoticeKind::Transport,
            EngineError::Malformed(_)
            | EngineError::Undecodable(_)
            | EngineError::UnexpectedReply => NoticeKind::Integrity,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub category: StatusCategory,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    phase: Phase,
    board: Option<BoardSnapshot>,
    status: Option<Status>,
    selection: Selection,
    input: InputUnifier,
    orientation: Orientation,
    timer: GameTimer,
    history: MoveHistory,
    notice: Option<Notice>,
    difficulty: Option<Difficulty>,
    pending: Option<Request>,
    farewell: Option<Ticket>,
    generation: u32,
    serial: u32,
}

impl Session {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> Option<&BoardSnapshot> {
        self.board.as_ref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn input(&self) -> &InputUnifier {
        &self.input
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Move submitted and not yet answered, shown optimistically.
    pub fn in_flight(&self) -> Option<MoveIntent> {
        match self.pending {
            Some(Request {
                call: EngineCall::Move(intent),
                ..
            }) => Some(intent),
            _ => None,
        }
    }

    /// The engine reset sent by [`Session::quit`] has not been answered yet.
    pub fn is_quitting(&self) -> bool {
        self.farewell.is_some()
    }

    /// Board input is taken while playing. A pending destination lookup does
    /// not block it: the next select or commit replaces the lookup.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Active)
            && matches!(self.pending_call(), None | Some(EngineCall::LegalMoves(_)))
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.orientation == orientation {
            return false;
        }
        self.orientation = orientation;
        true
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<Request> {
        if !self.accepts_input() {
            // a lifted finger or a finished drag must not leave marks behind
            if event.ends_gesture() {
                self.input.reset();
            }
            log::trace!("input ignored ({:?}, pending: {})", self.phase, self.is_pending());
            return None;
        }

        let board = self.board.as_ref()?;
        let ctx = InputContext {
            board,
            selected: self.selection.selected(),
            orientation: self.orientation,
        };
        let intent = self.input.handle(event, &ctx)?;

        log::debug!("intent: {:?}", intent);
        match intent {
            Intent::Select(square) => self.select_square(square),
            Intent::Deselect => {
                self.selection.clear();
                None
            }
            Intent::Commit(intent) => self.commit_move(intent),
        }
    }

    pub fn select_square(&mut self, square: Square) -> Option<Request> {
        if !self.accepts_input() {
            return None;
        }
        if !self.board.as_ref().is_some_and(|board| board.is_occupied(square)) {
            return None;
        }

        self.selection.select(square);
        Some(self.issue(EngineCall::LegalMoves(square)))
    }

    pub fn commit_move(&mut self, intent: MoveIntent) -> Option<Request> {
        if !self.accepts_input() {
            return None;
        }

        log::debug!("submitting move {}", intent);
        Some(self.issue(EngineCall::Move(intent)))
    }

    pub fn start(&mut self, difficulty: Difficulty) -> Option<Request> {
        if !matches!(self.phase, Phase::PreGame | Phase::GameOver) {
            return None;
        }
        if matches!(self.pending_call(), Some(EngineCall::Start(_))) {
            return None;
        }
        if self.is_quitting() {
            log::debug!("engine still resetting after quit, start refused");
            return None;
        }

        log::info!("starting a new game ({})", difficulty);
        self.generation = self.generation.wrapping_add(1);
        self.clear_interaction();
        Some(self.issue(EngineCall::Start(difficulty)))
    }

    pub fn reset(&mut self) -> Option<Request> {
        if !matches!(self.phase, Phase::Active | Phase::GameOver) {
            return None;
        }
        if matches!(self.pending_call(), Some(EngineCall::Reset)) {
            return None;
        }

        log::info!("resetting the game");
        self.generation = self.generation.wrapping_add(1);
        self.clear_interaction();
        Some(self.issue(EngineCall::Reset))
    }

    pub fn undo(&mut self) -> Option<Request> {
        if !matches!(self.phase, Phase::Active | Phase::GameOver) || self.is_pending() {
            return None;
        }

        self.clear_interaction();
        Some(self.issue(EngineCall::Undo))
    }

    pub fn pause(&mut self) -> bool {
        if !matches!(self.phase, Phase::Active) {
            return false;
        }

        self.phase = Phase::Paused;
        self.timer.freeze();
        self.clear_interaction();
        true
    }

    pub fn resume(&mut self) -> bool {
        if !matches!(self.phase, Phase::Paused) {
            return false;
        }

        self.phase = Phase::Active;
        self.timer.resume();
        true
    }

    /// Back to the pre-game menu no matter what; the returned server reset is
    /// fire-and-forget and its outcome changes nothing locally.
    pub fn quit(&mut self) -> Request {
        log::info!("quitting to menu");
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            orientation: self.orientation,
            difficulty: self.difficulty,
            generation,
            serial: self.serial,
            ..Default::default()
        };

        let request = self.next_request(EngineCall::Reset);
        self.farewell = Some(request.ticket);
        request
    }

    pub fn tick(&mut self) -> bool {
        self.timer.tick()
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Applies the outcome of a request; returns whether anything changed.
    pub fn complete(&mut self, ticket: Ticket, result: core::result::Result<Reply, EngineError>) -> bool {
        if self.farewell == Some(ticket) {
            self.farewell = None;
            match result {
                Ok(_) => log::debug!("engine reset after quit"),
                Err(err) => log::warn!("engine reset after quit failed: {}", err),
            }
            return true;
        }

        let Some(request) = self.pending.filter(|pending| pending.ticket == ticket) else {
            log::debug!("dropping stale reply {:?}", ticket);
            return false;
        };
        self.pending = None;

        let outcome = match (request.call, result) {
            (_, Err(err)) => Err(err),
            (EngineCall::LegalMoves(origin), Ok(Reply::Destinations(resp))) => {
                self.apply_destinations(origin, &resp)
            }
            (EngineCall::Move(intent), Ok(Reply::Moved(resp))) => self.apply_move(intent, resp),
            (EngineCall::Start(difficulty), Ok(Reply::Board(resp))) => {
                self.apply_new_game(resp).map(|()| self.difficulty = Some(difficulty))
            }
            (EngineCall::Reset, Ok(Reply::Board(resp))) => self.apply_new_game(resp),
            (EngineCall::Undo, Ok(Reply::Board(resp))) => self.apply_undo(resp),
            _ => Err(EngineError::UnexpectedReply),
        };

        if let Err(err) = outcome {
            self.fail(request.call, &err);
        }
        true
    }

    fn apply_destinations(
        &mut self,
        origin: Square,
        resp: &LegalMovesResponse,
    ) -> core::result::Result<(), EngineError> {
        let destinations = resp
            .moves
            .iter()
            .map(|&id| Square::try_from(id))
            .collect::<Result<Vec<_>>>()?;

        if !self.selection.highlight(origin, destinations) {
            log::debug!("selection moved on from {}, ignoring destinations", origin);
        }
        Ok(())
    }

    fn apply_move(
        &mut self,
        intent: MoveIntent,
        resp: MoveResponse,
    ) -> core::result::Result<(), EngineError> {
        let category = resp.category();
        let board = parse_board(&resp.board)?;

        self.board = Some(board);
        self.status = Some(Status {
            text: resp.status,
            category,
        });
        let player = resp.player_move.unwrap_or_else(|| intent.to_string());
        self.history.push(player, resp.ai_move);
        self.clear_interaction();

        if category.is_terminal() {
            self.enter_game_over();
        }
        Ok(())
    }

    fn apply_new_game(&mut self, resp: BoardResponse) -> core::result::Result<(), EngineError> {
        let category = resp.category();
        let board = parse_board(&resp.board)?;

        self.board = Some(board);
        self.status = Some(Status {
            text: resp.status,
            category,
        });
        self.history.clear();
        self.notice = None;
        self.clear_interaction();
        self.timer.restart();
        if matches!(self.phase, Phase::Paused) {
            self.timer.freeze();
        } else {
            self.phase = Phase::Active;
        }

        if category.is_terminal() {
            self.enter_game_over();
        }
        Ok(())
    }

    fn apply_undo(&mut self, resp: BoardResponse) -> core::result::Result<(), EngineError> {
        let category = resp.category();
        let board = parse_board(&resp.board)?;

        self.board = Some(board);
        self.status = Some(Status {
            text: resp.status,
            category,
        });
        self.history.pop();
        self.clear_interaction();

        match self.phase {
            Phase::GameOver if !category.is_terminal() => {
                log::info!("undo left the finished position, game resumes");
                self.phase = Phase::Active;
                self.timer.resume();
            }
            Phase::Active | Phase::Paused if category.is_terminal() => self.enter_game_over(),
            _ => {}
        }
        Ok(())
    }

    fn enter_game_over(&mut self) {
        log::info!("game over");
        self.phase = Phase::GameOver;
        self.timer.freeze();
        self.clear_interaction();
    }

    fn fail(&mut self, call: EngineCall, err: &EngineError) {
        match err {
            EngineError::Rejected(_) => log::info!("{:?} rejected: {}", call, err),
            EngineError::Transport(_) => log::warn!("{:?} failed in transport: {}", call, err),
            EngineError::Malformed(_)
            | EngineError::Undecodable(_)
            | EngineError::UnexpectedReply => {
                log::error!("{:?} got an unusable reply: {}", call, err)
            }
        }
        self.clear_interaction();
        self.notice = Some(Notice::from(err));
    }

    fn clear_interaction(&mut self) {
        self.selection.clear();
        self.input.reset();
    }

    fn pending_call(&self) -> Option<EngineCall> {
        self.pending.map(|request| request.call)
    }

    fn issue(&mut self, call: EngineCall) -> Request {
        if let Some(superseded) = self.pending_call() {
            log::debug!("{:?} supersedes {:?}", call, superseded);
        }
        let request = self.next_request(call);
        self.pending = Some(request);
        request
    }

    fn next_request(&mut self, call: EngineCall) -> Request {
        self.serial = self.serial.wrapping_add(1);
        Request {
            ticket: Ticket {
                generation: self.generation,
                serial: self.serial,
            },
            call,
        }
    }
}

fn parse_board(map: &SquareMap) -> core::result::Result<BoardSnapshot, EngineError> {
    Ok(BoardSnapshot::from_square_map(map)?)
}
