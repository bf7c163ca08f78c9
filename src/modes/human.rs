use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameLoopController, Phase, TickOutcome};
use crate::input::{InputHandler, KeyAction, NameEntry, NameEntryEvent};
use crate::leaderboard::{
    JsonFileStore, Leaderboard, LeaderboardStore, load_or_init, record_score,
};
use crate::render::{Renderer, ScoreScreen};

/// Score waiting for the player to type a name
struct PendingEntry {
    score: u32,
    name: NameEntry,
}

/// Interactive keyboard play in the terminal
pub struct HumanMode<S = JsonFileStore> {
    controller: GameLoopController,
    store: S,
    leaderboard: Option<Leaderboard>,
    pending_entry: Option<PendingEntry>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode<JsonFileStore> {
    pub fn new(config: GameConfig) -> Self {
        let store = JsonFileStore::new(config.leaderboard_path.clone());
        Self::with_store(config, store)
    }
}

impl<S: LeaderboardStore> HumanMode<S> {
    pub fn with_store(config: GameConfig, store: S) -> Self {
        Self {
            controller: GameLoopController::new(config),
            store,
            leaderboard: None,
            pending_entry: None,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Raw ticks at the configured frame rate; the controller divides them down
        let tick_interval = self.controller.config().tick_interval();
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!(
            tick_us = tick_interval.as_micros() as u64,
            "terminal session started"
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Raw game tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        let snapshot = self.controller.snapshot();
                        let scores = self.leaderboard.as_ref().map(|board| ScoreScreen {
                            board,
                            name_prompt: self.pending_entry.as_ref().map(|entry| entry.name.text()),
                        });
                        self.renderer.render(frame, &snapshot, scores.as_ref());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("terminal session ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if InputHandler::is_interrupt(&key) {
            self.should_quit = true;
            return;
        }

        if let Some(entry) = self.pending_entry.as_mut() {
            match entry.name.handle_key_event(key) {
                NameEntryEvent::Editing => {}
                NameEntryEvent::Submitted(name) => self.submit_name(&name),
                NameEntryEvent::Cancelled => self.submit_name(""),
            }
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => self.controller.set_direction(direction),
            KeyAction::Start => {
                if self.controller.phase() != Phase::Playing {
                    self.controller.start();
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver { final_score, cause } = self.controller.tick() {
            debug!(final_score, ?cause, "showing game over screen");
            self.on_game_over(final_score);
        }
    }

    /// Load the highscores and ask for a name if the score made the list
    fn on_game_over(&mut self, final_score: u32) {
        let board = load_or_init(&self.store);
        if board.qualifies(final_score) {
            self.pending_entry = Some(PendingEntry {
                score: final_score,
                name: NameEntry::new(),
            });
        }
        self.leaderboard = Some(board);
    }

    fn submit_name(&mut self, name: &str) {
        let Some(entry) = self.pending_entry.take() else {
            return;
        };
        if let Some(board) = self.leaderboard.as_mut() {
            record_score(&self.store, board, name, entry.score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore> {
        HumanMode::with_store(GameConfig::default(), MemoryStore::new())
    }

    fn press(mode: &mut HumanMode<MemoryStore>, code: KeyCode) {
        mode.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_space_starts_round() {
        let mut mode = mode();
        assert_eq!(mode.controller.phase(), Phase::Idle);
        press(&mut mode, KeyCode::Char(' '));
        assert_eq!(mode.controller.phase(), Phase::Playing);
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Char('q'));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_qualifying_score_prompts_for_name() {
        let mut mode = mode();
        mode.on_game_over(5);

        assert!(mode.pending_entry.is_some());
        // A blank list was created and saved straight away
        assert_eq!(mode.store.saved(), Some(Leaderboard::default()));

        press(&mut mode, KeyCode::Char('j'));
        press(&mut mode, KeyCode::Char('o'));
        // Space is part of the name while typing, not a restart
        press(&mut mode, KeyCode::Char(' '));
        assert_eq!(mode.controller.phase(), Phase::Idle);
        press(&mut mode, KeyCode::Enter);

        assert!(mode.pending_entry.is_none());
        let saved = mode.store.saved().unwrap();
        assert_eq!(saved.entries()[0].name, "JO ");
        assert_eq!(saved.entries()[0].score, 5);
    }

    #[test]
    fn test_ctrl_c_quits_during_name_entry() {
        let mut mode = mode();
        mode.on_game_over(3);
        mode.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_cancelled_name_is_blank() {
        let mut mode = mode();
        mode.on_game_over(2);
        press(&mut mode, KeyCode::Esc);

        let saved = mode.store.saved().unwrap();
        assert_eq!(saved.entries()[0].name, "   ");
        assert_eq!(saved.entries()[0].score, 2);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_zero_score_skips_prompt() {
        let mut mode = mode();
        mode.on_game_over(0);
        assert!(mode.pending_entry.is_none());
        assert!(mode.leaderboard.is_some());
    }

    #[test]
    fn test_round_plays_to_game_over() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Char(' '));
        press(&mut mode, KeyCode::Up);

        // Heading up from row 15 hits the wall well within this many raw ticks
        for _ in 0..1_000 {
            mode.update_game();
            if mode.controller.phase() == Phase::GameOver {
                break;
            }
        }
        assert_eq!(mode.controller.phase(), Phase::GameOver);
        assert!(mode.leaderboard.is_some());
    }
}
