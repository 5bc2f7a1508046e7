//! Afterglow canvas: persistent cells that fade a little every frame.

/// One glyph slot on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowCell {
    pub glyph: char,
    pub intensity: f32,
}

impl Default for GlowCell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            intensity: 0.0,
        }
    }
}

/// Grid of glowing cells, `columns` x `rows`, stored column-major.
///
/// Painting a glyph alpha-blends it over what is already there, and
/// [`fade`](Afterglow::fade) darkens everything like a translucent fill
/// drawn over the whole canvas.
#[derive(Debug, Clone, Default)]
pub struct Afterglow {
    columns: usize,
    rows: usize,
    cells: Vec<GlowCell>,
}

impl Afterglow {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![GlowCell::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Darken every cell by the overlay opacity `alpha`.
    pub fn fade(&mut self, alpha: f32) {
        let keep = (1.0 - alpha).clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.intensity *= keep;
        }
    }

    /// Draw `glyph` at the given cell with opacity `brightness`.
    pub fn paint(&mut self, column: usize, row: usize, glyph: char, brightness: f32) {
        if column >= self.columns || row >= self.rows {
            return;
        }

        let alpha = brightness.clamp(0.0, 1.0);
        let cell = &mut self.cells[column * self.rows + row];
        cell.glyph = glyph;
        cell.intensity = cell.intensity * (1.0 - alpha) + alpha;
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&GlowCell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(column * self.rows + row)
    }
}
