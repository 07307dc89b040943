use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::invalid_config(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Pixel-space axis-aligned box with a non-negative origin and a non-empty extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width, always > 0.
    pub w: u32,
    /// Height, always > 0.
    pub h: u32,
}

impl BoundingBox {
    /// Build a box, rejecting empty extents.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> ReelResult<Self> {
        if w == 0 || h == 0 {
            return Err(ReelError::layout(format!(
                "bounding box must have w>0 and h>0 (got {w}x{h})"
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Build a box from signed layout arithmetic, rejecting negative origins.
    pub fn from_signed(x: i64, y: i64, w: i64, h: i64) -> ReelResult<Self> {
        if x < 0 || y < 0 {
            return Err(ReelError::layout(format!(
                "bounding box origin must be non-negative (got {x},{y})"
            )));
        }
        let to_u32 = |v: i64| {
            u32::try_from(v)
                .map_err(|_| ReelError::layout(format!("bounding box value {v} out of range")))
        };
        Self::new(to_u32(x)?, to_u32(y)?, to_u32(w.max(0))?, to_u32(h.max(0))?)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Geometric center.
    pub fn center(&self) -> Point {
        Point::new(
            f64::from(self.x) + f64::from(self.w) * 0.5,
            f64::from(self.y) + f64::from(self.h) * 0.5,
        )
    }

    /// Strict AABB intersection test: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest box covering both inputs.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Whether `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_box(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the box lies entirely inside the canvas.
    pub fn fits_canvas(&self, canvas: Canvas) -> bool {
        self.right() <= canvas.width && self.bottom() <= canvas.height
    }

    /// Convert to a `kurbo` rectangle for renderers.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
