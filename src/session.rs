//! Session controller
//!
//! Owns the round state, player settings and best score. Input arrives at
//! any time and is queued; each `tick` drains the queue, runs one simulation
//! step and reports what happened. Rendering and audio read `snapshot()` and
//! react to the returned events.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::best_score::BestScore;
use crate::settings::Settings;
use crate::sim::{
    Direction, GameEvent, GameState, Goal, Layout, ObstacleKind, Phase, TickInput, tick,
};

/// Input commands from the keyboard/button layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Restart,
    ToggleMusic,
}

/// An obstacle as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub row: i32,
    pub x: f32,
    pub width: f32,
    pub kind: ObstacleKind,
}

/// Read-only view of everything collaborators may draw or play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub columns: i32,
    pub rows: i32,
    pub player_col: i32,
    pub player_row: i32,
    /// Player cell center in continuous grid units
    pub player_center: Vec2,
    pub obstacles: Vec<ObstacleView>,
    pub goals: Vec<Goal>,
    pub lives: u32,
    pub score: u64,
    pub best_score: u64,
    pub phase: Phase,
    pub death_timer: u32,
    pub tick: u64,
    pub music_enabled: bool,
    /// Effective volumes for the audio layer (0.0 - 1.0)
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub reduced_motion: bool,
}

/// One tick's output for a frame-driven collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

pub struct Session {
    state: GameState,
    settings: Settings,
    best: BestScore,
    pending: VecDeque<Command>,
}

impl Session {
    pub fn new(layout: Layout, settings: Settings, best: BestScore) -> Self {
        log::info!(
            "New session: {}x{} field, {} lanes, {} goals",
            layout.field.columns,
            layout.field.rows,
            layout.lanes.len(),
            layout.goal_columns.len()
        );
        Self {
            state: GameState::new(layout, settings.horizontal_edge),
            settings,
            best,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best_score(&self) -> BestScore {
        self.best
    }

    /// Replace settings; the edge policy takes effect immediately
    pub fn set_settings(&mut self, settings: Settings) {
        self.state.edge = settings.horizontal_edge;
        self.settings = settings;
    }

    /// Queue a command for the next tick
    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn move_player(&mut self, direction: Direction) {
        self.push(Command::Move(direction));
    }

    pub fn toggle_music(&mut self) {
        self.push(Command::ToggleMusic);
    }

    /// Reinitialize the round right away, from any phase
    pub fn restart(&mut self) {
        self.pending.clear();
        self.state.restart();
        log::info!("Round restarted");
    }

    /// Apply queued input and advance one tick
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut input = TickInput::default();

        while let Some(command) = self.pending.pop_front() {
            match command {
                Command::Move(direction) => input.moves.push(direction),
                Command::ToggleMusic => {
                    let enabled = self.settings.toggle_music();
                    events.push(GameEvent::MusicToggled { enabled });
                    log::info!("Music {}", if enabled { "on" } else { "off" });
                }
                Command::Restart => {
                    input.moves.clear();
                    self.state.restart();
                    log::info!("Round restarted");
                }
            }
        }

        let score_before = self.state.score;
        events.extend(tick(&mut self.state, &input));

        if self.state.score != score_before && self.best.record(self.state.score) {
            log::debug!("New best score {}", self.best.score);
            events.push(GameEvent::NewBestScore {
                score: self.best.score,
            });
        }

        events
    }

    /// Tick once and package the result
    pub fn frame(&mut self) -> Frame {
        let events = self.tick();
        Frame {
            snapshot: self.snapshot(),
            events,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let field = state.field();
        let kind_of = |row: i32| {
            state
                .layout
                .lanes
                .iter()
                .find(|l| l.row == row)
                .map(|l| l.kind)
                .unwrap_or_default()
        };

        Snapshot {
            columns: field.columns,
            rows: field.rows,
            player_col: state.player.col,
            player_row: state.player.row,
            player_center: field.cell_center(state.player.col, state.player.row),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    row: o.row,
                    x: o.x,
                    width: o.width,
                    kind: kind_of(o.row),
                })
                .collect(),
            goals: state.goals.clone(),
            lives: state.lives,
            score: state.score,
            best_score: self.best.score,
            phase: state.phase,
            death_timer: state.phase.death_timer(),
            tick: state.time_ticks,
            music_enabled: self.settings.music_enabled,
            music_volume: self.settings.effective_music_volume(),
            sfx_volume: self.settings.effective_sfx_volume(),
            reduced_motion: self.settings.reduced_motion,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Layout::default(), Settings::default(), BestScore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::EdgePolicy;
    use crate::sim::{LaneDirection, Obstacle, Outcome};

    fn open_session() -> Session {
        let mut layout = Layout::default();
        layout.lanes.clear();
        Session::new(layout, Settings::default(), BestScore::default())
    }

    fn press(session: &mut Session, direction: Direction, times: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..times {
            session.move_player(direction);
            events.extend(session.tick());
        }
        events
    }

    fn idle(session: &mut Session, ticks: u32) -> Vec<GameEvent> {
        (0..ticks).flat_map(|_| session.tick()).collect()
    }

    #[test]
    fn test_input_waits_for_tick() {
        let mut session = open_session();
        session.move_player(Direction::Up);
        assert_eq!(session.state().player.row, 13);
        session.tick();
        assert_eq!(session.state().player.row, 12);
    }

    #[test]
    fn test_nine_steps_up_scores_45() {
        let mut session = open_session();
        press(&mut session, Direction::Up, 9);
        let snap = session.snapshot();
        assert_eq!(snap.player_row, 4);
        assert_eq!(snap.score, 45);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.best_score, 45);
    }

    #[test]
    fn test_restart_from_any_phase() {
        let phases = [
            Phase::Playing,
            Phase::Dying {
                ticks_left: 10,
                then: crate::sim::AfterDeath::Respawn,
            },
            Phase::Terminal(Outcome::GameOver),
            Phase::Terminal(Outcome::Won),
        ];
        for phase in phases {
            let mut session = Session::default();
            press(&mut session, Direction::Up, 2);
            session.state.lives = 1;
            session.state.goals[0].reached = true;
            session.state.phase = phase;

            session.restart();
            session.restart();

            let snap = session.snapshot();
            assert_eq!(snap.lives, START_LIVES);
            assert_eq!(snap.score, 0);
            assert!(snap.goals.iter().all(|g| !g.reached));
            assert_eq!((snap.player_col, snap.player_row), (5, 13));
            assert_eq!(snap.phase, Phase::Playing);
            assert_eq!(snap.death_timer, 0);
        }
    }

    #[test]
    fn test_restart_keeps_best_score() {
        let mut session = open_session();
        press(&mut session, Direction::Up, 4);
        session.restart();
        assert_eq!(session.snapshot().score, 0);
        assert_eq!(session.best_score().score, 20);
    }

    #[test]
    fn test_queued_restart_drops_earlier_moves() {
        let mut session = open_session();
        session.move_player(Direction::Up);
        session.move_player(Direction::Up);
        session.push(Command::Restart);
        session.move_player(Direction::Left);
        session.tick();

        let state = session.state();
        assert_eq!((state.player.col, state.player.row), (4, 13));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_direct_restart_discards_pending_input() {
        let mut session = open_session();
        session.move_player(Direction::Up);
        session.restart();
        session.tick();
        assert_eq!(session.state().player.row, 13);
    }

    #[test]
    fn test_toggle_music() {
        let mut session = open_session();
        session.toggle_music();
        assert_eq!(session.tick(), vec![GameEvent::MusicToggled { enabled: false }]);
        assert!(!session.snapshot().music_enabled);
        assert_eq!(session.snapshot().music_volume, 0.0);
        session.toggle_music();
        assert_eq!(session.tick(), vec![GameEvent::MusicToggled { enabled: true }]);
    }

    #[test]
    fn test_best_score_event_only_on_improvement() {
        let mut session = Session::new(
            {
                let mut layout = Layout::default();
                layout.lanes.clear();
                layout
            },
            Settings::default(),
            BestScore::new(10),
        );
        let events = press(&mut session, Direction::Up, 3);
        let bests: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::NewBestScore { score } => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(bests, vec![15]);
    }

    #[test]
    fn test_edge_policy_from_settings() {
        let settings = Settings {
            horizontal_edge: EdgePolicy::Clamp,
            ..Settings::default()
        };
        let mut layout = Layout::default();
        layout.lanes.clear();
        let mut session = Session::new(layout, settings, BestScore::default());
        press(&mut session, Direction::Right, 10);
        assert_eq!(session.state().player.col, 11);

        session.set_settings(Settings::default());
        press(&mut session, Direction::Right, 1);
        assert_eq!(session.state().player.col, 0);
    }

    #[test]
    fn test_game_over_sequence() {
        let mut session = open_session();
        session.state.obstacles.push(Obstacle {
            row: 12,
            x: 4.5,
            width: 2.0,
            speed: 0.0001,
            direction: LaneDirection::Right,
        });

        let mut lost = 0;
        for _ in 0..START_LIVES {
            let events = press(&mut session, Direction::Up, 1);
            assert!(events.contains(&GameEvent::LifeLost {
                lives_left: START_LIVES - 1 - lost
            }));
            lost += 1;
            let wait = if lost < START_LIVES { DEATH_TICKS } else { FINAL_DEATH_TICKS };
            assert_eq!(session.snapshot().death_timer, wait);
            let events = idle(&mut session, wait);
            if lost < START_LIVES {
                assert!(events.contains(&GameEvent::Respawned));
            } else {
                assert!(events.contains(&GameEvent::GameOver));
            }
        }

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Terminal(Outcome::GameOver));
        assert_eq!(snap.lives, 0);

        // Terminal swallows input
        press(&mut session, Direction::Up, 3);
        assert_eq!(session.snapshot().lives, 0);
        assert_eq!(session.snapshot().player_row, 12);
    }

    #[test]
    fn test_snapshot_kinds_and_json() {
        let mut session = Session::default();
        let frame = session.frame();
        assert_eq!(frame.snapshot.tick, 1);
        assert_eq!(frame.snapshot.player_center, Vec2::new(5.5, 13.5));
        assert_eq!(frame.snapshot.obstacles.len(), 21);
        assert_eq!(frame.snapshot.obstacles[0].kind, ObstacleKind::Candle);
        assert_eq!(frame.snapshot.obstacles[20].kind, ObstacleKind::Bat);

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"events\":[]"));
    }
}
