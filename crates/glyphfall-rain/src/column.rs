//! A single falling column of glyphs.

/// One vertical stream of glyphs with its own clock.
///
/// The head sits at row `tick` and moves down one row every `interval_ms`.
/// Brightness is derived from `tick` alone, so it can be recomputed at any
/// time without extra state.
#[derive(Debug, Clone)]
pub struct Column {
    /// Left edge of the column in terminal cells.
    x: u16,
    /// Glyphs for each row, fixed for the life of the column.
    glyphs: Vec<char>,
    /// Height of one row in terminal lines.
    cell_height: u16,
    /// Brightness multiplier per trailing band.
    decay: f32,
    /// Row of the head. Starts fully above the visible area.
    tick: i64,
    /// Time between two ticks.
    interval_ms: u64,
    /// Time of the next tick.
    next_update_ms: u64,
}

impl Column {
    /// Create a column whose head starts `glyphs.len()` rows above the top.
    pub fn new(x: u16, glyphs: Vec<char>, cell_height: u16, decay: f32, interval_ms: u64) -> Self {
        let tick = -(glyphs.len() as i64);
        Self {
            x,
            glyphs,
            cell_height,
            decay,
            tick,
            interval_ms,
            next_update_ms: 0,
        }
    }

    /// Schedule the first tick.
    pub fn with_first_update(mut self, at_ms: u64) -> Self {
        self.next_update_ms = at_ms;
        self
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn tick(&self) -> i64 {
        self.tick
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn next_update_ms(&self) -> u64 {
        self.next_update_ms
    }

    /// Advance the head by one row if the current interval has elapsed.
    ///
    /// At most one tick per call, however late `now_ms` is.
    pub fn update(&mut self, now_ms: u64) {
        if now_ms >= self.next_update_ms {
            self.tick += 1;
            self.next_update_ms = now_ms + self.interval_ms;
        }
    }

    /// Brightness of `row` in `[0, 1]`.
    ///
    /// Rows below the head are dark. Rows above it are grouped into bands of
    /// growing size (1, 2, 3, ...): band `n` covers the distances `d` where
    /// `n` is the smallest integer with `n(n+1)/2 > d`, and is lit at
    /// `decay^(n-1)`.
    pub fn brightness_at(&self, row: usize) -> f32 {
        let distance = self.tick - row as i64;
        if distance < 0 {
            return 0.0;
        }

        let band = brightness_band(distance as u64);
        self.decay.powi((band - 1) as i32)
    }

    /// Whether the head has passed the last row plus `extra_tail_ticks`.
    pub fn is_complete(&self, total_rows: usize, extra_tail_ticks: usize) -> bool {
        self.tick > (total_rows + extra_tail_ticks) as i64
    }

    /// Vertical position of `row` in terminal lines.
    pub fn row_y(&self, row: usize) -> usize {
        row * usize::from(self.cell_height)
    }
}

/// Smallest `n >= 1` with `n(n+1)/2 > distance`.
fn brightness_band(distance: u64) -> u64 {
    let d = distance as f64;
    let n = (((1.0 + 8.0 * (d + 1.0)).sqrt() - 1.0) / 2.0).ceil() as u64;
    n.max(1)
}
