mod cli;
mod logging;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphfall_config::Config;
use glyphfall_core::{Debouncer, GridParameters};
use glyphfall_rain::{RainSession, RainSettings};
use glyphfall_text::{SupplierSettings, TextSupplier};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Clear,
};

use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = cli.config_path();
    let mut config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);

    let log_path = logging::init(&config)?;
    config.sanitize();
    tracing::info!("starting glyphfall, logging to {log_path:?}");

    if cli.save_config
        && let Some(path) = &config_path
    {
        config.save_to(path)?;
    }

    let terminal = ratatui::init();
    let result = App::new(config, config_path, cli.seed).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Active configuration.
    config: Config,
    /// Where the configuration is saved on exit.
    config_path: Option<PathBuf>,
    /// Theme was changed interactively and should be saved.
    theme_changed: bool,
    /// Show the key help line.
    show_help: bool,
    /// Rain state for the current terminal size.
    session: RainSession,
    /// Background text source.
    supplier: TextSupplier,
    /// Pending terminal size after a resize burst.
    resize: Debouncer<(u16, u16)>,
    /// Reference point of the animation clock.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] and start the text supplier.
    pub fn new(config: Config, config_path: Option<PathBuf>, seed: Option<u64>) -> Self {
        let settings = RainSettings {
            display: config.display.clone(),
            animation: config.animation.clone(),
            glitch: config.glitch.clone(),
            stream: config.stream.clone(),
            theme: config.theme,
            assert_mode: config.assert_mode(),
        };
        let session = RainSession::new(settings, GridParameters::default(), seed);
        let supplier = TextSupplier::spawn(SupplierSettings::from(&config.stream));
        let resize = Debouncer::new(config.display.resize_debounce_ms);

        Self {
            running: false,
            config,
            config_path,
            theme_changed: false,
            show_help: false,
            session,
            supplier,
            resize,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.session.reinitialize(self.grid_for(size.width, size.height));
        self.supplier.send(self.session.load_command());

        self.running = true;
        while self.running {
            let now = self.now_ms();

            for message in self.supplier.drain() {
                self.session.handle_message(message);
            }
            if let Some(command) = self.session.poll_refill(now) {
                self.supplier.send(command);
            }
            if let Some((width, height)) = self.resize.poll(now) {
                self.on_viewport_change(width, height);
            }

            if self.session.advance(now) {
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
        }

        self.save_theme();
        Ok(())
    }

    /// Milliseconds since the application started.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn grid_for(&self, width: u16, height: u16) -> GridParameters {
        GridParameters::calculate(width, height, &self.config.display)
    }

    /// Start over with a fresh session if the grid no longer fits the terminal.
    fn on_viewport_change(&mut self, width: u16, height: u16) {
        let grid = self.grid_for(width, height);
        if grid == self.session.grid() {
            return;
        }

        tracing::info!("viewport changed to {width}x{height}, reinitialising");
        self.session.reinitialize(grid);
        self.supplier.send(self.session.load_command());
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(&self.session, area);

        if !self.show_help {
            return;
        }

        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
        let color = self.session.theme().color();
        let glitch = if self.session.glitch_enabled() { "on" } else { "off" };

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "g".bold().fg(color),
            format!(" glitch {glitch}  ").dark_gray(),
            "h".bold().fg(color),
            " hide help".dark_gray(),
        ])
        .centered();
        frame.render_widget(Clear, chunks[1]);
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = Duration::from_millis(self.config.animation.frame_interval_ms());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => {
                    let now = self.now_ms();
                    self.resize.schedule(now, (width, height));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('g')) => self.toggle_glitch(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.session.set_theme(self.session.theme().next());
        self.theme_changed = true;
    }

    fn toggle_glitch(&mut self) {
        let enabled = self.session.toggle_glitch();
        tracing::info!("glitch {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Persist an interactively chosen theme.
    fn save_theme(&mut self) {
        if !self.theme_changed {
            return;
        }
        let Some(path) = &self.config_path else {
            return;
        };

        self.config.theme = self.session.theme();
        if let Err(e) = self.config.save_to(path) {
            tracing::warn!("could not save theme: {e}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use glyphfall_core::ColorTheme;

    use super::*;

    fn app() -> App {
        let mut config = Config::default();
        config.stream.source = Some("/nonexistent/glyphfall.json".to_string());
        App::new(config, None, Some(1))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.running = true;
        app.on_key_event(press(KeyCode::Char('q')));
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_cycle_color_marks_theme_changed() {
        let mut app = app();
        app.on_key_event(press(KeyCode::Char('c')));
        assert_eq!(app.session.theme(), ColorTheme::Cyan);
        assert!(app.theme_changed);
    }

    #[test]
    fn test_toggle_glitch_and_help() {
        let mut app = app();
        assert!(app.session.glitch_enabled());
        app.on_key_event(press(KeyCode::Char('g')));
        assert!(!app.session.glitch_enabled());

        app.on_key_event(press(KeyCode::Char('h')));
        assert!(app.show_help);
    }

    #[test]
    fn test_viewport_change_reinitialises_only_on_new_grid() {
        let mut app = app();
        app.on_viewport_change(80, 24);
        assert_eq!(app.session.grid().columns, 40);

        app.session.handle_message(glyphfall_core::SupplierMessage::Character {
            data: vec!['a'; 10],
        });
        app.on_viewport_change(81, 24);
        assert_eq!(app.session.buffer_len(), 10);

        app.on_viewport_change(100, 30);
        assert_eq!(app.session.grid().columns, 50);
        assert_eq!(app.session.buffer_len(), 0);
    }
}
