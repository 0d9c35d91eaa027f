use anyhow::{Context, Result, bail};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, GameStatus, Speed};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    speed: Speed,
    speed_changed: bool,
    show_help: bool,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let speed = config.speed;
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            speed,
            speed_changed: false,
            show_help: false,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.check_terminal()?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup on both exit paths
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Fail up front, with a readable message, when there is no usable
    /// terminal to draw on. Raw mode has not been entered yet at this point.
    fn check_terminal(&self) -> Result<()> {
        if !stderr().is_tty() {
            bail!("stderr is not an interactive terminal; snake needs a TTY to draw on");
        }

        let (cols, rows) =
            crossterm::terminal::size().context("Failed to query the terminal size")?;
        let config = self.engine.config();

        // Grid cells are two columns wide, plus the border; header and
        // footer take three rows each above and below the bordered grid
        let need_cols = (config.grid_width * 2 + 2) as u16;
        let need_rows = (config.grid_height + 8) as u16;

        if cols < need_cols || rows < need_rows {
            bail!(
                "terminal is {cols}x{rows} but a {}x{} grid needs at least {need_cols}x{need_rows}; \
                 resize the terminal or pass a smaller --width/--height",
                config.grid_width,
                config.grid_height,
            );
        }

        Ok(())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.metrics,
                            self.speed,
                            self.show_help,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // The speed toggle re-arms the tick timer outside the select
            if self.speed_changed {
                self.speed_changed = false;
                tick_timer = interval(self.speed.tick_interval());
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        // Resize events are ignored: the renderer reflows to the frame size
        // on every draw
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(dir) => {
                    self.pending_direction = Some(dir);
                }
                KeyAction::TogglePause => {
                    self.state.toggle_pause();
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::ToggleWrap => {
                    self.state.toggle_wrap();
                }
                KeyAction::ToggleSpeed => {
                    self.speed = self.speed.toggled();
                    self.speed_changed = true;
                }
                KeyAction::ToggleHelp => {
                    self.show_help = !self.show_help;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let was_running = self.state.status == GameStatus::Running;
        let result = self.engine.step(&mut self.state, action);

        // Count each game over once, on the tick it happens
        if was_running && result.terminated {
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        // A runtime wrap toggle survives the restart
        let wrap = self.state.wrap;
        self.state = self.engine.reset();
        self.state.wrap = wrap;
        self.metrics.on_game_start();
        self.pending_direction = None;
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
