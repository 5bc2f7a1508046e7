//! Grid geometry derived from the terminal size.

use crate::settings::DisplaySettings;

/// Snapshot of the character grid for one terminal size.
///
/// Always recomputed as a whole with [`GridParameters::calculate`] when the
/// viewport changes; never patched field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridParameters {
    /// Number of falling columns.
    pub columns: u16,
    /// Number of rows per column.
    pub rows: u16,
    /// Horizontal size of a grid cell in terminal cells.
    pub cell_width: u16,
    /// Vertical size of a grid cell in terminal lines.
    pub cell_height: u16,
    /// Display width of one glyph.
    pub glyph_width: u16,
    /// Gap on each side of a glyph.
    pub border: u16,
    /// Width actually covered by the grid.
    pub width: u16,
    /// Height actually covered by the grid.
    pub height: u16,
}

impl GridParameters {
    /// Compute the grid fitting inside a `width` x `height` terminal area.
    pub fn calculate(width: u16, height: u16, display: &DisplaySettings) -> Self {
        let cell_width = display.cell_width().max(1);
        let cell_height = 1;
        let columns = width / cell_width;
        let rows = height / cell_height;

        Self {
            columns,
            rows,
            cell_width,
            cell_height,
            glyph_width: display.glyph_width,
            border: display.border,
            width: columns * cell_width,
            height: rows * cell_height,
        }
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// Left edge of the given column.
    pub fn column_x(&self, column: u16) -> u16 {
        column.saturating_mul(self.cell_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_default() {
        let grid = GridParameters::calculate(81, 24, &DisplaySettings::default());
        assert_eq!(grid.columns, 40);
        assert_eq!(grid.rows, 24);
        assert_eq!(grid.cell_width, 2);
        assert_eq!(grid.width, 80);
        assert_eq!(grid.height, 24);
        assert_eq!(grid.cell_count(), 960);
    }

    #[test]
    fn test_calculate_with_border() {
        let display = DisplaySettings {
            glyph_width: 1,
            border: 1,
            ..Default::default()
        };
        let grid = GridParameters::calculate(10, 5, &display);
        assert_eq!(grid.cell_width, 3);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.column_x(2), 6);
    }

    #[test]
    fn test_zero_glyph_width_does_not_divide_by_zero() {
        let display = DisplaySettings {
            glyph_width: 0,
            border: 0,
            ..Default::default()
        };
        let grid = GridParameters::calculate(10, 5, &display);
        assert_eq!(grid.columns, 10);
    }

    #[test]
    fn test_equal_sizes_compare_equal() {
        let display = DisplaySettings::default();
        assert_eq!(
            GridParameters::calculate(80, 24, &display),
            GridParameters::calculate(81, 24, &display)
        );
        assert_ne!(
            GridParameters::calculate(80, 24, &display),
            GridParameters::calculate(80, 25, &display)
        );
    }
}
