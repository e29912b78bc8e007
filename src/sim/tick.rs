//! Fixed-rate simulation tick
//!
//! Applies input transitions, then advances a running game by one step.

use glam::IVec2;

use super::collision;
use super::physics;
use super::spawn::{GapSource, needs_spawn};
use super::state::{GameEvent, GameMode, GameState};

/// Semantic input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Flap / start / restart (space)
    Flap,
    /// Pause toggle (enter)
    TogglePause,
    /// Pointer click in playfield coordinates
    PointerClick(IVec2),
}

/// Input for a single tick, applied in order before the step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - autopilot flaps for the player
    pub idle_mode: bool,
}

impl TickInput {
    pub fn events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            idle_mode: false,
        }
    }

    pub fn idle() -> Self {
        Self {
            events: Vec::new(),
            idle_mode: true,
        }
    }
}

/// Advance the game state by one tick
pub fn tick<G: GapSource>(state: &mut GameState<G>, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &event in &input.events {
        handle_input(state, event, &mut events);
    }

    if input.idle_mode && state.mode == GameMode::Running && autopilot_wants_flap(state) {
        physics::flap(&mut state.body, state.tuning.flap_impulse);
        events.push(GameEvent::Flapped);
    }

    if state.mode != GameMode::Running {
        return events;
    }

    step(state, &mut events);
    events
}

/// Apply one input event to the state machine
pub fn handle_input<G: GapSource>(
    state: &mut GameState<G>,
    event: InputEvent,
    events: &mut Vec<GameEvent>,
) {
    match (state.mode, event) {
        (GameMode::Paused, InputEvent::Flap) => {
            state.mode = GameMode::Running;
            log::info!("Run started");
            events.push(GameEvent::Started);
        }
        (GameMode::Paused, InputEvent::TogglePause) => {
            state.mode = GameMode::Running;
            events.push(GameEvent::Resumed);
        }
        (GameMode::Paused, InputEvent::PointerClick(point)) => {
            if state.buttons.primary.contains(point) {
                state.mode = GameMode::Running;
                events.push(GameEvent::Resumed);
            } else if state.buttons.quit.contains(point) {
                events.push(GameEvent::QuitRequested);
            }
        }

        (GameMode::Running, InputEvent::Flap) => {
            physics::flap(&mut state.body, state.tuning.flap_impulse);
            events.push(GameEvent::Flapped);
        }
        (GameMode::Running, InputEvent::TogglePause) => {
            state.mode = GameMode::Paused;
            events.push(GameEvent::Paused);
        }
        (GameMode::Running, InputEvent::PointerClick(_)) => {}

        (GameMode::GameOver, InputEvent::Flap) => restart(state, events),
        (GameMode::GameOver, InputEvent::PointerClick(point)) => {
            if state.buttons.primary.contains(point) {
                restart(state, events);
            } else if state.buttons.quit.contains(point) {
                events.push(GameEvent::QuitRequested);
            }
        }
        (GameMode::GameOver, InputEvent::TogglePause) => {}
    }
}

fn restart<G: GapSource>(state: &mut GameState<G>, events: &mut Vec<GameEvent>) {
    state.reset();
    log::info!("Run restarted (high score {})", state.high_score());
    events.push(GameEvent::Restarted);
}

/// One running step: spawn, physics, scoring, collision, retirement
fn step<G: GapSource>(state: &mut GameState<G>, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    if needs_spawn(&state.pipes, state.tuning.spawn_x) {
        state.spawn_pair();
        events.push(GameEvent::PairSpawned);
    }

    physics::fall(&mut state.body, state.tuning.gravity);
    physics::scroll(&mut state.pipes, state.tuning.scroll_speed);

    // Score and collide against pre-retirement positions
    let passed = state
        .scores
        .award_passes(state.body.rect.x, &mut state.pipes);
    if passed > 0 {
        let score = state.scores.score;
        log::debug!("Passed {passed} pair(s), score {score}");
        // One event per pair, each carrying the running score
        events.extend(
            (score - passed + 1..=score).map(|score| GameEvent::PairPassed { score }),
        );
    }

    let contact = collision::detect(
        &state.body.rect,
        &state.pipes,
        state.tuning.playfield_height,
    );

    state.pipes.retain(|pair| !pair.is_offscreen());

    if let Some(contact) = contact {
        state.mode = GameMode::GameOver;
        let score = state.scores.score;
        log::info!(
            "Game over after {} ticks: {:?}, score {}",
            state.time_ticks,
            contact,
            score
        );
        events.push(GameEvent::GameOver { score, contact });

        if let Some(high) = state.scores.finish_run() {
            log::info!("New high score: {high}");
            events.push(GameEvent::NewHighScore(high));
        }
    }
}

/// Autopilot: flap when about to sink below the next gap
fn autopilot_wants_flap<G: GapSource>(state: &GameState<G>) -> bool {
    let body = state.body.rect;
    let tuning = &state.tuning;
    let margin = tuning.gravity * 3;

    // Next pair whose trailing edge hasn't cleared the body yet
    let (gap_top, gap_bottom) = state
        .pipes
        .iter()
        .find(|pair| pair.upper.right() >= body.x)
        .map(|pair| (pair.upper.bottom(), pair.lower.y))
        .unwrap_or((0, tuning.playfield_height));

    let sinking_out = body.bottom() + tuning.gravity + margin >= gap_bottom;
    let room_above = body.y - tuning.flap_impulse > gap_top + margin;
    sinking_out && room_above
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Contact;
    use crate::sim::spawn::test_support::ScriptedGaps;
    use crate::sim::{ObstaclePair, Rect};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn scripted(values: Vec<i32>) -> GameState<ScriptedGaps> {
        GameState::new(Tuning::default(), 0, ScriptedGaps::new(values)).unwrap()
    }

    fn flap() -> TickInput {
        TickInput::events([InputEvent::Flap])
    }

    fn click(x: i32, y: i32) -> TickInput {
        TickInput::events([InputEvent::PointerClick(IVec2::new(x, y))])
    }

    #[test]
    fn test_paused_ignores_ticks() {
        let mut state = scripted(vec![100]);
        let before = state.snapshot();
        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput::default()).is_empty());
        }
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_flap_starts_without_impulse() {
        let mut state = scripted(vec![100]);
        let events = tick(&mut state, &flap());
        assert_eq!(state.mode, GameMode::Running);
        assert_eq!(events[0], GameEvent::Started);
        // Only gravity moved the body on the starting tick
        assert_eq!(state.body.rect.y, 203);
    }

    #[test]
    fn test_gravity_scenario() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.mode, GameMode::Running);
        assert_eq!(state.body.rect.y, 230);
        assert_eq!(state.pipes[0].upper.x, 640 - 50);
    }

    #[test]
    fn test_running_flap_applies_impulse() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        let events = tick(&mut state, &flap());
        assert!(events.contains(&GameEvent::Flapped));
        assert_eq!(state.body.rect.y, 200 - 70 + 3);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = scripted(vec![100]);
        tick(&mut state, &flap());
        let y = state.body.rect.y;

        let events = tick(&mut state, &TickInput::events([InputEvent::TogglePause]));
        assert_eq!(events, vec![GameEvent::Paused]);
        assert_eq!(state.mode, GameMode::Paused);
        assert_eq!(state.body.rect.y, y);

        tick(&mut state, &TickInput::events([InputEvent::TogglePause]));
        assert_eq!(state.mode, GameMode::Running);
        assert_eq!(state.body.rect.y, y + 3);
    }

    #[test]
    fn test_resume_button_while_paused() {
        let mut state = scripted(vec![100]);
        tick(&mut state, &click(10, 10));
        assert_eq!(state.mode, GameMode::Paused);

        tick(&mut state, &click(300, 260));
        assert_eq!(state.mode, GameMode::Running);
    }

    #[test]
    fn test_floor_contact_ends_run() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        state.body.rect.y = 427;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.mode, GameMode::GameOver);
        assert!(events.contains(&GameEvent::GameOver {
            score: 0,
            contact: Contact::Floor
        }));
        // Zero never beats a zero high score
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));
    }

    #[test]
    fn test_flap_into_ceiling_ends_run() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        state.body.rect.y = 60;
        tick(&mut state, &flap());
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_obstacle_contact_raises_high_score() {
        let mut state = scripted(vec![50]);
        state.mode = GameMode::Running;
        state.scores.score = 3;
        // Upper segment spans y 0..=50; put the body in it
        state.body.rect.y = 20;
        state.pipes[0].upper.x = 110;
        state.pipes[0].lower.x = 110;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.mode, GameMode::GameOver);
        assert!(events.contains(&GameEvent::GameOver {
            score: 3,
            contact: Contact::Obstacle { index: 0 }
        }));
        assert!(events.contains(&GameEvent::NewHighScore(3)));
        assert_eq!(state.high_score(), 3);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::GameOver;
        let before = state.snapshot();
        tick(&mut state, &TickInput::events([InputEvent::TogglePause]));
        tick(&mut state, &click(5, 5));
        tick(&mut state, &TickInput::idle());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_via_flap() {
        let mut state = scripted(vec![100, 200]);
        state.mode = GameMode::GameOver;
        state.scores.score = 9;
        state.body.rect.y = 440;
        state.spawn_pair();

        let events = tick(&mut state, &flap());
        assert_eq!(events[0], GameEvent::Restarted);
        assert_eq!(state.mode, GameMode::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.pipes.len(), 1);
        // Restart tick also runs one step
        assert_eq!(state.body.rect.y, 203);
        assert_eq!(state.pipes[0].upper.x, 635);
    }

    #[test]
    fn test_restart_and_quit_buttons() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::GameOver;

        let events = tick(&mut state, &click(230, 310));
        assert_eq!(events, vec![GameEvent::QuitRequested]);
        assert_eq!(state.mode, GameMode::GameOver);

        // Edge of the play-again button counts
        let events = tick(&mut state, &click(420, 290));
        assert_eq!(events[0], GameEvent::Restarted);
        assert_eq!(state.mode, GameMode::Running);
    }

    #[test]
    fn test_running_ignores_clicks() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        let events = tick(&mut state, &click(230, 310));
        assert!(!events.contains(&GameEvent::QuitRequested));
        assert_eq!(state.mode, GameMode::Running);
    }

    #[test]
    fn test_pass_scored_before_retirement() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        // Trailing edge at 4: after one scroll it's off-screen and past the body
        state.pipes[0] = ObstaclePair {
            upper: Rect::new(-66, 0, 70, 100),
            lower: Rect::new(-66, 250, 70, 230),
            passed: false,
        };

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::PairPassed { score: 1 }));
        assert_eq!(state.score(), 1);
        // Old pair retired, replacement spawned at the right edge
        assert!(events.contains(&GameEvent::PairSpawned));
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].upper.x, 635);
    }

    #[test]
    fn test_multiple_passes_emit_one_event_each() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        let pair = |x| ObstaclePair {
            upper: Rect::new(x, 0, 70, 100),
            lower: Rect::new(x, 250, 70, 230),
            passed: false,
        };
        // Both trailing edges end up left of the body (x=100) after one scroll
        state.pipes = vec![pair(0), pair(20)];

        let events = tick(&mut state, &TickInput::default());
        let passes: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PairPassed { .. }))
            .copied()
            .collect();
        assert_eq!(
            passes,
            vec![
                GameEvent::PairPassed { score: 1 },
                GameEvent::PairPassed { score: 2 },
            ]
        );
        assert_eq!(state.score(), 2);
        assert_eq!(state.mode, GameMode::Running);
    }

    #[test]
    fn test_spawn_policy_spacing() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        // Keep the body safely mid-gap
        let mut spawns = Vec::new();
        for t in 0..200 {
            state.body.rect.y = 150;
            let events = tick(&mut state, &TickInput::default());
            if events.contains(&GameEvent::PairSpawned) {
                spawns.push(t);
            }
        }
        // Newest pair must drop below x=300: (640-300)/5 = 68 steps, spawned on the next tick
        assert_eq!(spawns[0], 69);
        assert_eq!(spawns[1], 69 * 2);
        assert_eq!(state.mode, GameMode::Running);
    }

    #[test]
    fn test_run_scores_each_pair_once() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        let mut passes = 0;
        for _ in 0..600 {
            state.body.rect.y = 150;
            for event in tick(&mut state, &TickInput::default()) {
                if let GameEvent::PairPassed { .. } = event {
                    passes += 1;
                }
            }
        }
        assert_eq!(state.mode, GameMode::Running);
        assert!(passes > 0);
        assert_eq!(state.score(), passes);
        assert!(state.pipes.iter().all(|p| !p.is_offscreen()));
    }

    #[test]
    fn test_autopilot_flaps_when_sinking() {
        let mut state = scripted(vec![100]);
        state.mode = GameMode::Running;
        // Gap is 100..250; body bottom near the lower segment
        state.body.rect.y = 190;
        let events = tick(&mut state, &TickInput::idle());
        assert!(events.contains(&GameEvent::Flapped));
        assert_eq!(state.body.rect.y, 190 - 70 + 3);

        // Mid-gap: no flap
        let events = tick(&mut state, &TickInput::idle());
        assert!(!events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::seeded(Tuning::default(), 0, 99999).unwrap();
        let mut b = GameState::seeded(Tuning::default(), 0, 99999).unwrap();

        let inputs = [flap(), TickInput::idle(), TickInput::default(), flap()];
        for _ in 0..300 {
            for input in &inputs {
                assert_eq!(tick(&mut a, input), tick(&mut b, input));
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    proptest! {
        #[test]
        fn prop_score_counts_pass_events(seed in any::<u64>(), flaps in prop::collection::vec(any::<bool>(), 300)) {
            let mut state = GameState::seeded(Tuning::default(), 0, seed).unwrap();
            state.mode = GameMode::Running;
            let mut passes = 0u32;
            let mut last_score = 0;
            for &f in &flaps {
                let input = if f { flap() } else { TickInput::idle() };
                let events = tick(&mut state, &input);
                passes += events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::PairPassed { .. }))
                    .count() as u32;

                prop_assert!(state.score() >= last_score);
                last_score = state.score();
                for pair in &state.pipes {
                    if pair.upper.right() < state.body.rect.x {
                        prop_assert!(pair.passed);
                    }
                }
                if state.mode != GameMode::Running {
                    break;
                }
            }
            prop_assert_eq!(state.score(), passes);
        }
    }
}
