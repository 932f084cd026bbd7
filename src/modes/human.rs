use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

use crate::game::{GameConfig, GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::scheduler::{IntervalScheduler, TickTimer};
use crate::storage::ScoreStore;

/// Interactive play in the terminal
#[derive(Debug)]
pub struct HumanMode<S> {
    engine: GameEngine<S, IntervalScheduler>,
    timer: TickTimer,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    needs_render: bool,
}

impl<S: ScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        let (scheduler, timer) = IntervalScheduler::channel();
        let engine = GameEngine::new(config, store, scheduler)?;
        let renderer = Renderer::new(engine.config().canvas_size);

        Ok(Self {
            engine,
            timer,
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
            needs_render: true,
        })
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

        loop {
            if self.needs_render {
                self.draw(terminal)?;
            }

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only fires while a game is running
                _ = self.timer.tick() => {
                    self.on_tick();
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

        log::info!("Quitting, best score {}", self.engine.best_score());
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let state = self.engine.state();
        let best_score = self.engine.best_score();
        terminal
            .draw(|frame| self.renderer.render(frame, state, best_score))
            .context("Failed to draw frame")?;
        self.needs_render = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(_, _) => self.needs_render = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = self.input_handler.handle_key_event(key);

        match action {
            KeyAction::Quit => {
                self.should_quit = true;
                return;
            }
            KeyAction::Restart => self.engine.reset(),
            _ => {
                if !self.engine.is_running() && action.starts_game() {
                    self.engine.reset();
                }
            }
        }

        if let KeyAction::Turn(direction) = action {
            self.engine.change_direction(direction);
        }

        self.needs_render = true;
    }

    fn on_tick(&mut self) {
        let outcome = self.engine.tick();
        if let TickOutcome::GameOver(collision) = outcome {
            log::debug!("Round ended by {:?}", collision);
        }
        if outcome.needs_render() {
            self.needs_render = true;
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
