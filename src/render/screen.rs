//! The cell buffer and diff compositor.
//!
//! Elements paint into the buffer through z-checked writes; `flush` yields
//! exactly the cells whose value changed since the previous flush and clears
//! the flags. The buffer holds one previous and one current logical state by
//! mutating cells in place — there is no snapshotting and no diff history.
//!
//! Cell lifecycle per frame:
//! `begin_frame` releases every cell's z claim, paints claim cells back,
//! `flush` drains the dirty set. Resize rebuilds the grid with every cell
//! dirty, since absolute geometry is no longer valid.

use unicode_width::UnicodeWidthChar;

use crate::geometry::Rectangle;
use crate::style::{BorderStyle, CellStyle, Color};

use super::cell::Cell;

/// A flushed cell update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    pub x: i32,
    pub y: i32,
    /// `None` marks the continuation half of a wide glyph.
    pub ch: Option<char>,
    pub style: CellStyle,
}

/// A 2D grid of cells with change tracking.
#[derive(Debug, Clone)]
pub struct Screen {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The whole screen as a rectangle.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, (self.width - 1).max(0), (self.height - 1).max(0))
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Cell at a position, for inspection.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Release every cell's z claim. Call once at the start of each frame
    /// before elements paint.
    pub fn begin_frame(&mut self) {
        for cell in &mut self.cells {
            cell.release_claim();
        }
    }

    /// Paint one cell iff the z-index claims it (higher wins; equal z, later
    /// paint wins). Out-of-bounds writes are silently clipped.
    pub fn paint_cell(&mut self, x: i32, y: i32, ch: Option<char>, style: CellStyle, z: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        if cell.claimable_at(z) {
            cell.write(ch, style, z);
        }
    }

    /// Fill every in-bounds cell of `rect` with a glyph and style.
    pub fn paint(&mut self, rect: Rectangle, ch: char, style: CellStyle, z: i32) {
        let x1 = rect.lower_x().max(0);
        let y1 = rect.lower_y().max(0);
        let x2 = rect.higher_x().min(self.width - 1);
        let y2 = rect.higher_y().min(self.height - 1);

        for y in y1..=y2 {
            for x in x1..=x2 {
                let idx = self.index(x, y);
                let cell = &mut self.cells[idx];
                if cell.claimable_at(z) {
                    cell.write(Some(ch), style, z);
                }
            }
        }
    }

    /// Fill a rectangle with the background color, keeping no glyphs.
    pub fn fill_rect(&mut self, rect: Rectangle, bg: Color, z: i32) {
        self.paint(rect, ' ', CellStyle::new(Color::Default, bg), z);
    }

    /// Draw a border frame just inside `rect`. Rectangles narrower than two
    /// cells on either axis have no room for a frame and are skipped.
    pub fn draw_border(&mut self, rect: Rectangle, border: BorderStyle, bg: Color, z: i32) {
        let Some(chars) = border.kind.chars() else {
            return;
        };
        if rect.width() < 2 || rect.height() < 2 {
            return;
        }

        let style = CellStyle::new(border.color, bg);
        let (x1, y1) = (rect.lower_x(), rect.lower_y());
        let (x2, y2) = (rect.higher_x(), rect.higher_y());

        self.paint_cell(x1, y1, Some(chars.top_left), style, z);
        self.paint_cell(x2, y1, Some(chars.top_right), style, z);
        self.paint_cell(x2, y2, Some(chars.bottom_right), style, z);
        self.paint_cell(x1, y2, Some(chars.bottom_left), style, z);

        for x in (x1 + 1)..x2 {
            self.paint_cell(x, y1, Some(chars.horizontal), style, z);
            self.paint_cell(x, y2, Some(chars.horizontal), style, z);
        }
        for y in (y1 + 1)..y2 {
            self.paint_cell(x1, y, Some(chars.vertical), style, z);
            self.paint_cell(x2, y, Some(chars.vertical), style, z);
        }
    }

    /// Draw a single line of text starting at (x, y), clipped to `clip`.
    ///
    /// Wide glyphs claim a continuation cell; zero-width characters are
    /// skipped. Returns the number of columns used.
    pub fn draw_text_line(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: CellStyle,
        clip: Rectangle,
        z: i32,
    ) -> i32 {
        let mut col = x;

        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if col > clip.higher_x() {
                break;
            }
            if clip.contains(col, y) {
                self.paint_cell(col, y, Some(ch), style, z);
                if w == 2 && clip.contains(col + 1, y) {
                    self.paint_cell(col + 1, y, None, style, z);
                }
            }
            col += w;
        }

        col - x
    }

    /// Drain the dirty set: every changed cell in row-major order, flags
    /// cleared afterwards.
    pub fn flush(&mut self) -> Vec<Change> {
        let mut changes = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                let cell = &mut self.cells[idx];
                if cell.is_changed() {
                    changes.push(Change {
                        x,
                        y,
                        ch: cell.ch(),
                        style: cell.style(),
                    });
                    cell.mark_clean();
                }
            }
        }
        changes
    }

    /// Rebuild the grid for a new terminal size. Every cell comes back
    /// dirty: absolute geometry is invalid after a resize.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        let size = self.width as usize * self.height as usize;
        self.cells.clear();
        self.cells.resize(size, Cell::default());
    }
}
