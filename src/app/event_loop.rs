use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

/// Idle poll interval; also bounds how late an expired message disappears.
const IDLE_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails, the file exists
    /// but cannot be read, or terminal I/O fails while running.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - tex requires an interactive terminal")?;

        let result = terminal
            .size()
            .context("Failed to query terminal size")
            .and_then(|size| {
                Model::open(
                    self.file_path.clone(),
                    self.settings.clone(),
                    (size.width, size.height),
                )
                .context("Failed to open file")
            })
            .and_then(|mut model| Self::event_loop(&mut terminal, &mut model));

        // Restore before returning so any error prints on a clean screen.
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_message(Instant::now()) {
                needs_render = true;
            }

            let poll = if needs_render {
                Duration::ZERO
            } else {
                IDLE_POLL
            };
            if event::poll(poll)? {
                if let Some(msg) = Self::handle_event(&event::read()?) {
                    Self::dispatch(terminal, model, msg)?;
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while !model.should_quit && event::poll(Duration::ZERO)? {
                    if let Some(msg) = Self::handle_event(&event::read()?) {
                        Self::dispatch(terminal, model, msg)?;
                        needs_render = true;
                    }
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }
        }
        Ok(())
    }

    fn dispatch(terminal: &mut DefaultTerminal, model: &mut Model, msg: Message) -> Result<()> {
        tracing::debug!(?msg, "message");
        *model = update(std::mem::take(model), msg);
        Self::handle_side_effects(model);
        if msg == Message::Redraw {
            terminal.clear()?;
        }
        Ok(())
    }
}
