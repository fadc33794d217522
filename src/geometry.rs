//! Geometric primitives for plot layout and drawing.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Perpendicular distance from this point to the line through `a` and `b`.
    #[must_use]
    pub fn distance_to_line(self, a: Self, b: Self) -> f32 {
        let length = a.distance(b);
        if length < f32::EPSILON {
            return self.distance(a);
        }
        ((b.y - a.y) * self.x - (b.x - a.x) * self.y + b.x * a.y - b.y * a.x).abs() / length
    }
}

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl Area {
    /// Create a new area.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// One past the right-most column.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom row.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the area has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by the given margins, saturating at an empty area.
    #[must_use]
    pub fn inset(&self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            x: self.x + left.min(self.width),
            y: self.y + top.min(self.height),
            width: self.width.saturating_sub(left + right),
            height: self.height.saturating_sub(top + bottom),
        }
    }

    /// Split into a `rows × cols` grid, distributing leftover cells to the first tiles.
    #[must_use]
    pub fn grid(&self, rows: u32, cols: u32) -> Vec<Self> {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let spans = |total: u32, n: u32| -> Vec<(u32, u32)> {
            let base = total / n;
            let extra = total % n;
            let mut offset = 0;
            (0..n)
                .map(|i| {
                    let len = base + u32::from(i < extra);
                    let span = (offset, len);
                    offset += len;
                    span
                })
                .collect()
        };

        let row_spans = spans(self.height, rows);
        let col_spans = spans(self.width, cols);
        row_spans
            .iter()
            .flat_map(|&(ry, rh)| {
                col_spans.iter().map(move |&(cx, cw)| Self::new(self.x + cx, self.y + ry, cw, rh))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_point_lerp() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(10.0, 10.0);
        let mid = p1.lerp(p2, 0.5);
        assert!((mid.x - 5.0).abs() < 0.001);
        assert!((mid.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_distance_to_line() {
        let p = Point::new(1.0, 1.0);
        let d = p.distance_to_line(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert!((d - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_area_inset_saturates() {
        let area = Area::new(0, 0, 10, 4);
        assert_eq!(area.inset(1, 1, 1, 1), Area::new(1, 1, 8, 2));
        assert!(area.inset(6, 0, 6, 0).is_empty());
    }

    #[test]
    fn test_area_grid_covers_everything() {
        let area = Area::new(0, 0, 81, 25);
        let tiles = area.grid(2, 2);
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], Area::new(0, 0, 41, 13));
        assert_eq!(tiles[3], Area::new(41, 13, 40, 12));
        let cells: u32 = tiles.iter().map(|t| t.width * t.height).sum();
        assert_eq!(cells, 81 * 25);
    }
}
