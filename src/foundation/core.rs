use crate::foundation::error::{MicrocosmError, MicrocosmResult};

/// Absolute 0-based frame index in timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> MicrocosmResult<Self> {
        if den == 0 {
            return Err(MicrocosmError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MicrocosmError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f32(self) -> f32 {
        self.num as f32 / self.den as f32
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width over height.
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// The fixed run description every animation curve is driven from.
///
/// Normalized time for a frame is `index / (frames - 1)`, clamped to `[0, 1]`,
/// so the first frame always samples `t = 0` and the last `t = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Output resolution.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Total number of frames in the run.
    pub frames: u64,
}

impl Timeline {
    /// Create a validated timeline.
    pub fn new(canvas: Canvas, fps: Fps, frames: u64) -> MicrocosmResult<Self> {
        let tl = Self {
            canvas,
            fps,
            frames,
        };
        tl.validate()?;
        Ok(tl)
    }

    /// Check the invariants a run depends on.
    pub fn validate(&self) -> MicrocosmResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MicrocosmError::validation("canvas must be non-empty"));
        }
        if self.frames == 0 {
            return Err(MicrocosmError::validation("timeline must have >= 1 frame"));
        }
        Ok(())
    }

    /// Normalized time for `frame`, clamped to `[0, 1]`.
    ///
    /// A single-frame timeline samples `t = 0`.
    pub fn normalized(&self, frame: FrameIndex) -> f32 {
        if self.frames <= 1 {
            return 0.0;
        }
        (frame.0 as f32 / (self.frames - 1) as f32).clamp(0.0, 1.0)
    }
}

/// Linear-light RGB color. Components are unbounded above so emission colors
/// can carry intensities past 1.0.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearRgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl LinearRgb {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Multiply all components by `k`.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Clamp to displayable range and quantize to 8-bit RGB.
    pub fn to_rgb8(self) -> [u8; 3] {
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
