//! Pixel-mask collision engine
//!
//! Sprites here are non-rectangular silhouettes, so hit detection is an exact
//! per-pixel overlap test rather than a bounding-box check. A `SpriteMask`
//! stores one bit per pixel; `collide` tests two positioned masks for any
//! intersecting opaque pixel pair.

use std::fmt;

use glam::IVec2;

/// Binary collision mask aligned to a sprite's opaque pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteMask {
    width: u32,
    height: u32,
    bits: Vec<u64>,
}

/// Errors from parsing the text mask format (`#` opaque, `.` transparent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// No rows, or a zero-width first row
    Empty,
    /// Row `line` has a different width than the first row
    RaggedRow { line: usize },
    /// Character other than `#`, `.` or space
    BadGlyph { line: usize, col: usize, ch: char },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Empty => write!(f, "mask has no pixels"),
            MaskError::RaggedRow { line } => {
                write!(f, "mask row {line} differs in width from the first row")
            }
            MaskError::BadGlyph { line, col, ch } => {
                write!(f, "unexpected character {ch:?} at row {line}, column {col}")
            }
        }
    }
}

impl std::error::Error for MaskError {}

impl SpriteMask {
    /// Fully transparent mask.
    pub fn empty(width: u32, height: u32) -> Self {
        let words = ((width as usize * height as usize) + 63) / 64;
        Self {
            width,
            height,
            bits: vec![0; words],
        }
    }

    /// Fully opaque mask (rectangular sprite).
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                mask.set(x, y);
            }
        }
        mask
    }

    /// Build from a row-major slice of opacity flags, `cells.len() == w * h`.
    pub fn from_cells(width: u32, height: u32, cells: &[bool]) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        let mut mask = Self::empty(width, height);
        for (i, &opaque) in cells.iter().enumerate() {
            if opaque {
                mask.set(i as i32 % width as i32, i as i32 / width as i32);
            }
        }
        mask
    }

    /// Parse the text format: one string per row, `#` opaque, `.` or space
    /// transparent. All rows must have equal width.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MaskError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 || rows.is_empty() {
            return Err(MaskError::Empty);
        }
        let mut mask = Self::empty(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(MaskError::RaggedRow { line: y });
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => mask.set(x as i32, y as i32),
                    '.' | ' ' => {}
                    _ => {
                        return Err(MaskError::BadGlyph { line: y, col: x, ch });
                    }
                }
            }
        }
        Ok(mask)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sprite extent as a vector, for layout math.
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    /// Opacity at `(x, y)`; out-of-bounds coordinates are transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.bits[idx / 64] >> (idx % 64) & 1 == 1
    }

    fn set(&mut self, x: i32, y: i32) {
        let idx = y as usize * self.width as usize + x as usize;
        self.bits[idx / 64] |= 1 << (idx % 64);
    }

    /// Number of opaque pixels.
    pub fn pixel_count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// True iff any opaque pixel of `self` coincides with an opaque pixel of
    /// `other` placed at `offset` relative to `self`'s origin.
    pub fn overlap(&self, other: &SpriteMask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel-level overlap test between two positioned sprites. Pure predicate,
/// symmetric in its arguments.
pub fn collide(a: &SpriteMask, a_pos: IVec2, b: &SpriteMask, b_pos: IVec2) -> bool {
    a.overlap(b, b_pos - a_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn filled_masks_hit_when_rects_intersect() {
        let a = SpriteMask::filled(10, 10);
        let b = SpriteMask::filled(10, 10);
        assert!(collide(&a, IVec2::new(0, 0), &b, IVec2::new(5, 5)));
        assert!(collide(&a, IVec2::new(0, 0), &b, IVec2::new(9, 9)));
        // Touching edges share no pixel
        assert!(!collide(&a, IVec2::new(0, 0), &b, IVec2::new(10, 0)));
        assert!(!collide(&a, IVec2::new(0, 0), &b, IVec2::new(0, -10)));
    }

    #[test]
    fn bounding_boxes_overlap_but_masks_miss() {
        // Two opposing corner triangles: boxes intersect, silhouettes don't.
        let lower_left = SpriteMask::from_rows(&[
            "#...", //
            "##..",
            "###.",
            "####",
        ])
        .unwrap();
        let upper_right = SpriteMask::from_rows(&[
            "####", //
            ".###",
            "..##",
            "...#",
        ])
        .unwrap();
        // Shifted up-right, the 2x2 overlap window lands on the lower-left
        // triangle's transparent corner
        assert!(!collide(
            &lower_left,
            IVec2::new(0, 0),
            &upper_right,
            IVec2::new(2, -2),
        ));
        // Nudged together they do intersect
        assert!(collide(
            &lower_left,
            IVec2::new(0, 0),
            &upper_right,
            IVec2::new(0, 0),
        ));
    }

    #[test]
    fn out_of_bounds_is_transparent() {
        let m = SpriteMask::filled(4, 4);
        assert!(!m.get(-1, 0));
        assert!(!m.get(0, -1));
        assert!(!m.get(4, 0));
        assert!(!m.get(0, 4));
        assert!(m.get(3, 3));
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert_eq!(SpriteMask::from_rows(&[]), Err(MaskError::Empty));
        assert_eq!(
            SpriteMask::from_rows(&["##", "#"]),
            Err(MaskError::RaggedRow { line: 1 })
        );
        assert_eq!(
            SpriteMask::from_rows(&["#x"]),
            Err(MaskError::BadGlyph {
                line: 0,
                col: 1,
                ch: 'x'
            })
        );
    }

    #[test]
    fn from_rows_round_trips_pixels() {
        let m = SpriteMask::from_rows(&["#.#", ".#.", "#.#"]).unwrap();
        assert_eq!(m.size(), IVec2::new(3, 3));
        assert_eq!(m.pixel_count(), 5);
        assert!(m.get(0, 0));
        assert!(!m.get(1, 0));
        assert!(m.get(1, 1));
    }

    fn mask_strategy() -> impl Strategy<Value = SpriteMask> {
        (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<bool>(), (w * h) as usize)
                .prop_map(move |cells| SpriteMask::from_cells(w, h, &cells))
        })
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            a in mask_strategy(),
            b in mask_strategy(),
            ax in -15i32..15, ay in -15i32..15,
            bx in -15i32..15, by in -15i32..15,
        ) {
            let a_pos = IVec2::new(ax, ay);
            let b_pos = IVec2::new(bx, by);
            prop_assert_eq!(
                collide(&a, a_pos, &b, b_pos),
                collide(&b, b_pos, &a, a_pos)
            );
        }

        #[test]
        fn empty_mask_never_collides(
            b in mask_strategy(),
            dx in -15i32..15, dy in -15i32..15,
        ) {
            let a = SpriteMask::empty(8, 8);
            prop_assert!(!collide(&a, IVec2::ZERO, &b, IVec2::new(dx, dy)));
        }
    }
}
