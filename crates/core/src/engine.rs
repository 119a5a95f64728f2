//! Engine module - the game-state machine
//!
//! The engine owns one session (grid, active piece, score, status) and the
//! piece source. Every command takes `&mut self` and either applies, is
//! rejected by collision, or is a no-op in the wrong state; none of them can
//! fail or leave the session inconsistent.
//!
//! The engine has no clock. A host calls [`Engine::tick`] on its own cadence
//! and the input commands whenever the player acts.

use crate::config::{ConfigError, EngineConfig};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::line_clear_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameStatus, LockEvent};

/// The three legal single-cell moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Left,
    Right,
    Down,
}

impl MoveDir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
            MoveDir::Down => (0, 1),
        }
    }
}

/// What a call to [`Engine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game over; nothing changed.
    Idle,
    /// The active piece moved down one row.
    Fell,
    /// The active piece locked and a replacement was spawned (or could not be).
    Landed(LockEvent),
}

#[derive(Debug, Clone)]
struct Session {
    grid: Grid,
    /// `None` only once the game is over.
    active: Option<Piece>,
    score: u32,
    status: GameStatus,
    last_event: Option<LockEvent>,
}

impl Session {
    fn new<S: PieceSource + ?Sized>(config: &EngineConfig, source: &mut S) -> Self {
        Self {
            grid: Grid::new(config.width(), config.height()),
            active: Some(spawn_from(source, config.width())),
            score: 0,
            status: GameStatus::Running,
            last_event: None,
        }
    }
}

fn spawn_from<S: PieceSource + ?Sized>(source: &mut S, grid_width: u16) -> Piece {
    let kind = source.next_kind();
    let color = source.next_color();
    Piece::spawn(kind, color, grid_width)
}

/// Complete game engine
#[derive(Debug, Clone)]
pub struct Engine<S = SimpleRng> {
    config: EngineConfig,
    source: S,
    session: Session,
}

impl<S: PieceSource> Engine<S> {
    /// Start a session on an empty grid with a freshly spawned piece.
    pub fn new(config: EngineConfig, mut source: S) -> Self {
        let session = Session::new(&config, &mut source);
        Self {
            config,
            source,
            session,
        }
    }

    /// Start a session from a prepared position.
    ///
    /// The grid's dimensions become the session's configuration. Fails when the
    /// grid is too small or the piece does not fit where it stands.
    pub fn with_layout(grid: Grid, piece: Piece, source: S) -> Result<Self, ConfigError> {
        let config = EngineConfig::new(grid.width(), grid.height())?;
        if piece.collides(&grid) {
            return Err(ConfigError::PieceCollides);
        }
        Ok(Self {
            config,
            source,
            session: Session {
                grid,
                active: Some(piece),
                score: 0,
                status: GameStatus::Running,
                last_event: None,
            },
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.session.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.session.active.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn is_game_over(&self) -> bool {
        self.session.status.is_game_over()
    }

    /// Check if the active piece could move in the given direction
    pub fn can_move(&self, dir: MoveDir) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(active) = &self.session.active else {
            return false;
        };
        let (dx, dy) = dir.delta();
        !active.collides_at(&self.session.grid, dx, dy)
    }

    /// Try to move the active piece one cell.
    ///
    /// Returns false when the move is blocked or the game is over; the session
    /// is unchanged in both cases.
    pub fn try_move(&mut self, dir: MoveDir) -> bool {
        if !self.can_move(dir) {
            return false;
        }
        let (dx, dy) = dir.delta();
        if let Some(active) = self.session.active.as_mut() {
            active.translate(dx, dy);
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(MoveDir::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(MoveDir::Right)
    }

    /// Move down one row. Never locks; landing happens on [`Engine::tick`].
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(MoveDir::Down)
    }

    /// Rotate the active piece 90° clockwise.
    ///
    /// The candidate shape is checked at the piece's current position first.
    /// Only when it fits there is it committed, after which `x` is clamped so
    /// the new bounding box stays inside the side walls. A rotation that would
    /// only fit after clamping is rejected.
    pub fn rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Session { grid, active, .. } = &mut self.session;
        let Some(active) = active.as_mut() else {
            return false;
        };

        let candidate = active.rotate();
        let (x, y) = active.position();
        if candidate
            .filled_offsets()
            .any(|(dx, dy)| grid.is_occupied(x + dx, y + dy))
        {
            return false;
        }

        let width = grid.width() as i32;
        let rotated_width = candidate.cols() as i32;
        active.replace_shape(candidate);
        if x + rotated_width > width {
            active.set_x(width - rotated_width);
        } else if x < 0 {
            active.set_x(0);
        }
        true
    }

    /// Advance the game by one gravity step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Idle;
        }
        let Some(mut piece) = self.session.active.take() else {
            return TickOutcome::Idle;
        };

        if piece.collides_at(&self.session.grid, 0, 1) {
            return TickOutcome::Landed(self.land(piece));
        }

        piece.translate(0, 1);
        self.session.active = Some(piece);
        TickOutcome::Fell
    }

    /// Lock the piece, clear rows, score, and spawn the next piece.
    fn land(&mut self, piece: Piece) -> LockEvent {
        let session = &mut self.session;
        session.grid.lock(&piece);

        let lines = session.grid.clear_full_rows();
        let gained = line_clear_score(lines);
        session.score = session.score.saturating_add(gained);

        let next = spawn_from(&mut self.source, self.config.width());
        let game_over = next.collides(&session.grid);
        if game_over {
            session.status = GameStatus::GameOver;
            session.active = None;
        } else {
            session.active = Some(next);
        }

        let event = LockEvent {
            lines_cleared: lines as u32,
            score_gained: gained,
            game_over,
        };
        session.last_event = Some(event);
        event
    }

    /// Replace a finished session with a fresh one.
    ///
    /// Does nothing while the game is still running.
    pub fn restart(&mut self) -> bool {
        if self.session.status.is_running() {
            return false;
        }
        self.session = Session::new(&self.config, &mut self.source);
        true
    }

    /// Apply a host action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => self.restart(),
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.session.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.session.grid.width();
        out.height = self.session.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.session.grid.cells());
        out.active = self.session.active.as_ref().map(ActiveSnapshot::from);
        out.score = self.session.score;
        out.status = self.session.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Engine<SimpleRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default(), SimpleRng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::types::{Color, PieceKind};

    fn engine_with(kind: PieceKind) -> Engine<ScriptedSource> {
        Engine::new(
            EngineConfig::default(),
            ScriptedSource::repeating(kind, Color::Cyan),
        )
    }

    #[test]
    fn test_new_engine_state() {
        let engine = engine_with(PieceKind::T);

        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.score(), 0);
        assert!(engine.grid().cells().iter().all(|c| c.is_none()));

        let active = engine.active().unwrap();
        assert_eq!(active.kind(), PieceKind::T);
        assert_eq!(active.color(), Color::Cyan);
        assert_eq!(active.position(), (5, 0));
    }

    #[test]
    fn test_try_move_collision() {
        let mut engine = engine_with(PieceKind::O);

        let mut moves = 0;
        while engine.move_left() {
            moves += 1;
        }
        assert_eq!(moves, 5);
        assert_eq!(engine.active().unwrap().x(), 0);
        assert!(!engine.move_left());
        assert_eq!(engine.active().unwrap().x(), 0);
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut engine = engine_with(PieceKind::O);
        while engine.soft_drop() {}

        assert_eq!(engine.active().unwrap().y(), 18);
        assert!(engine.grid().cells().iter().all(|c| c.is_none()));
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_rotate_commits_in_open_space() {
        let mut engine = engine_with(PieceKind::I);
        assert!(engine.rotate());

        let shape = engine.active().unwrap().shape();
        assert_eq!((shape.rows(), shape.cols()), (4, 1));
    }

    #[test]
    fn test_rotate_rejected_when_only_clamping_would_fit() {
        let mut engine = engine_with(PieceKind::I);
        assert!(engine.rotate());
        while engine.move_right() {}
        assert_eq!(engine.active().unwrap().x(), 12);

        // Horizontal at x=12 would overflow; it is not clamped into place.
        assert!(!engine.rotate());
        let active = engine.active().unwrap();
        assert_eq!((active.shape().rows(), active.shape().cols()), (4, 1));
        assert_eq!(active.x(), 12);
    }

    #[test]
    fn test_tick_gravity() {
        let mut engine = engine_with(PieceKind::T);
        assert_eq!(engine.tick(), TickOutcome::Fell);
        assert_eq!(engine.active().unwrap().y(), 1);
    }

    #[test]
    fn test_tick_lands_and_spawns() {
        let mut engine = engine_with(PieceKind::O);
        while engine.soft_drop() {}

        let outcome = engine.tick();
        assert_eq!(
            outcome,
            TickOutcome::Landed(LockEvent {
                lines_cleared: 0,
                score_gained: 0,
                game_over: false,
            })
        );
        assert_eq!(engine.grid().get(5, 19), Some(Some(Color::Cyan)));
        assert_eq!(engine.grid().get(6, 18), Some(Some(Color::Cyan)));
        assert_eq!(engine.active().unwrap().position(), (5, 0));
        assert!(engine.take_last_event().is_some());
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_game_over_detection() {
        // Block one spawn cell of the next O; the current O rests on the floor.
        let mut grid = Grid::new(13, 20);
        grid.set(6, 0, Some(Color::Red));
        let piece = Piece::spawn(PieceKind::O, Color::Blue, 13).at(0, 18);
        let source = ScriptedSource::repeating(PieceKind::O, Color::Blue);
        let mut engine = Engine::with_layout(grid, piece, source).unwrap();

        match engine.tick() {
            TickOutcome::Landed(event) => assert!(event.game_over),
            other => panic!("expected landing, got {:?}", other),
        }
        assert!(engine.is_game_over());
        assert!(engine.active().is_none());

        let before = engine.grid().clone();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert!(!engine.move_left());
        assert!(!engine.rotate());
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut engine = engine_with(PieceKind::L);
        engine.tick();
        let before = engine.snapshot();

        assert!(!engine.apply_action(GameAction::Restart));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_with_layout_rejects_overlap() {
        let mut grid = Grid::new(13, 20);
        grid.set(5, 0, Some(Color::Red));
        let piece = Piece::spawn(PieceKind::O, Color::Blue, 13);
        let result = Engine::with_layout(grid, piece, SimpleRng::new(1));
        assert_eq!(result.err(), Some(ConfigError::PieceCollides));
    }

    #[test]
    fn test_snapshot_mirrors_queries() {
        let engine: Engine = Engine::default();
        let snap = engine.snapshot();

        assert_eq!((snap.width, snap.height), (13, 20));
        assert_eq!(snap.cells.len(), 13 * 20);
        assert_eq!(snap.score, engine.score());
        assert!(snap.playable());
        let active = snap.active.unwrap();
        assert_eq!((active.x, active.y), engine.active().unwrap().position());
    }
}
