//! The render session: columns, character buffer and canvas for one grid.

use glyphfall_core::{
    AnimationSettings, AssertMode, ColorTheme, DisplaySettings, GlitchSettings, GridParameters,
    StreamSettings, SupplierCommand, SupplierMessage, random_number,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::buffer::CharacterBuffer;
use crate::canvas::Afterglow;
use crate::chars::FILLER_GLYPH;
use crate::color::glow_color;
use crate::column::Column;
use crate::glitch::Glitch;

/// Everything a session needs to know about its configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RainSettings {
    pub display: DisplaySettings,
    pub animation: AnimationSettings,
    pub glitch: GlitchSettings,
    pub stream: StreamSettings,
    pub theme: ColorTheme,
    pub assert_mode: AssertMode,
}

/// Lifecycle of one column slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No column has been created yet.
    Empty,
    /// The column is falling.
    Active,
    /// The head has left the screen; the slot is reset on the next frame.
    Complete,
}

/// State of the animation for one terminal size.
///
/// Owns every piece of mutable rain state so that a resize can throw the
/// whole session away and start over.
#[derive(Debug)]
pub struct RainSession {
    settings: RainSettings,
    grid: GridParameters,
    slots: Vec<Option<Column>>,
    buffer: CharacterBuffer,
    canvas: Afterglow,
    glitch: Glitch,
    rng: StdRng,
    last_frame_ms: Option<u64>,
    next_buffer_check_ms: u64,
}

impl RainSession {
    /// Create a session for `grid`. A `seed` makes the animation reproducible.
    pub fn new(settings: RainSettings, grid: GridParameters, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let glitch = Glitch::new(settings.glitch.clone());

        let mut session = Self {
            settings,
            grid,
            slots: Vec::new(),
            buffer: CharacterBuffer::new(),
            canvas: Afterglow::default(),
            glitch,
            rng,
            last_frame_ms: None,
            next_buffer_check_ms: 0,
        };
        session.reinitialize(grid);
        session
    }

    /// Discard all columns, buffered characters and glow, and size for `grid`.
    pub fn reinitialize(&mut self, grid: GridParameters) {
        tracing::info!(
            "initialising {} columns x {} rows (cell width {})",
            grid.columns,
            grid.rows,
            grid.cell_width
        );

        self.grid = grid;
        self.slots = vec![None; usize::from(grid.columns)];
        self.buffer.clear();
        self.canvas = Afterglow::new(usize::from(grid.columns), usize::from(grid.height));
        self.last_frame_ms = None;
    }

    /// Command asking the supplier to load the configured text.
    pub fn load_command(&self) -> SupplierCommand {
        SupplierCommand::Load {
            url: self.settings.stream.source.clone(),
            batch_size: self.settings.stream.safe_batch_size(),
        }
    }

    /// Apply a message from the text supplier.
    pub fn handle_message(&mut self, message: SupplierMessage) {
        match message {
            SupplierMessage::Character { data } => self.buffer.append(data),
            SupplierMessage::Info { message } => tracing::info!("text supplier: {message}"),
            SupplierMessage::Error { message } => tracing::error!("text supplier: {message}"),
        }
    }

    /// Check the buffer level if a check is due and ask for more text when low.
    pub fn poll_refill(&mut self, now_ms: u64) -> Option<SupplierCommand> {
        if now_ms < self.next_buffer_check_ms {
            return None;
        }
        self.next_buffer_check_ms = now_ms + self.settings.stream.buffer_check_interval_ms;

        let threshold =
            self.grid.cell_count() as f32 * self.settings.stream.refill_threshold_multiplier;
        if self.buffer.len() as f32 >= threshold {
            return None;
        }

        tracing::debug!(
            "buffer at {} characters (threshold {threshold}), requesting more",
            self.buffer.len()
        );
        Some(SupplierCommand::RequestMore {
            batch_size: self.settings.stream.safe_batch_size(),
        })
    }

    /// Run one animation frame at `now_ms`.
    ///
    /// Returns false without doing anything if called sooner than the
    /// frame interval after the previous frame.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_frame_ms
            && now_ms.saturating_sub(last) < self.settings.animation.frame_interval_ms()
        {
            return false;
        }
        self.last_frame_ms = Some(now_ms);

        self.canvas.fade(self.settings.display.fade_alpha);
        self.glitch
            .refresh(now_ms, &mut self.rng, self.settings.assert_mode);

        let rows = usize::from(self.grid.rows);
        let extra_tail_ticks = self.settings.animation.extra_tail_ticks;
        let floor = self.settings.display.visibility_floor;

        for index in 0..self.slots.len() {
            if self.slots[index].is_none() {
                self.reset_column(index, now_ms);
            }
            let Some(column) = self.slots[index].as_mut() else {
                continue;
            };

            column.update(now_ms);

            for (row, &glyph) in column.glyphs().iter().enumerate() {
                let brightness = column.brightness_at(row);
                if brightness <= floor {
                    continue;
                }
                let glyph = self.glitch.apply(glyph, index, row);
                self.canvas
                    .paint(index, column.row_y(row), glyph, brightness);
            }

            if column.is_complete(rows, extra_tail_ticks) {
                self.reset_column(index, now_ms);
            }
        }

        true
    }

    /// Put a fresh column in slot `index`, filled from the buffer.
    fn reset_column(&mut self, index: usize, now_ms: u64) {
        let glyphs = self
            .buffer
            .take_padded(usize::from(self.grid.rows), FILLER_GLYPH);
        let interval_ms = random_number(
            &mut self.rng,
            self.settings.assert_mode,
            self.settings.animation.droplet_speed_min_ms,
            self.settings.animation.droplet_speed_max_ms,
        );
        let x = self.grid.column_x(index as u16);

        self.slots[index] = Some(
            Column::new(
                x,
                glyphs,
                self.grid.cell_height,
                self.settings.animation.decay_rate,
                interval_ms,
            )
            .with_first_update(now_ms + interval_ms),
        );
    }

    pub fn grid(&self) -> GridParameters {
        self.grid
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.slots.get(index)?.as_ref()
    }

    /// Lifecycle state of slot `index`, `None` if out of range.
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        let slot = self.slots.get(index)?;
        Some(match slot {
            None => SlotState::Empty,
            Some(column)
                if column.is_complete(
                    usize::from(self.grid.rows),
                    self.settings.animation.extra_tail_ticks,
                ) =>
            {
                SlotState::Complete
            }
            Some(_) => SlotState::Active,
        })
    }

    pub fn canvas(&self) -> &Afterglow {
        &self.canvas
    }

    pub fn theme(&self) -> ColorTheme {
        self.settings.theme
    }

    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.settings.theme = theme;
    }

    pub fn glitch_enabled(&self) -> bool {
        self.glitch.is_enabled()
    }

    /// Flip glitching on or off, returning the new state.
    pub fn toggle_glitch(&mut self) -> bool {
        let enabled = !self.glitch.is_enabled();
        self.glitch.set_enabled(enabled);
        enabled
    }
}

impl Widget for &RainSession {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let floor = self.settings.display.visibility_floor;

        for column in 0..self.canvas.columns() {
            let x = area.x + self.grid.column_x(column as u16) + self.grid.border;
            if x >= area.right() {
                break;
            }

            for row in 0..self.canvas.rows() {
                let y = area.y + row as u16;
                if y >= area.bottom() {
                    break;
                }
                let Some(cell) = self.canvas.cell(column, row) else {
                    continue;
                };
                if cell.intensity <= floor {
                    continue;
                }

                let style = Style::new().fg(glow_color(self.settings.theme, cell.intensity));
                buf.set_string(x, y, cell.glyph.to_string(), style);
            }
        }
    }
}
