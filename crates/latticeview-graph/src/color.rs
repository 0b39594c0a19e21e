use latticeview_core::ConceptLattice;

/// RGB color representation, renderer-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation toward `other`, channel-wise, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

/// Fill color of the most general concepts (top of the lattice).
pub const LEVEL_RAMP_TOP: Rgb = Rgb::new(0x8f, 0x4f, 0xff);
/// Fill color of the bottom concept.
pub const LEVEL_RAMP_BOTTOM: Rgb = Rgb::new(0x46, 0x00, 0xbd);
/// Default link stroke.
pub const LINK_BASE: Rgb = Rgb::new(0x99, 0x99, 0x99);
/// Stroke of links related to the clicked concept.
pub const LINK_MARKED: Rgb = Rgb::new(0x99, 0x00, 0xff);
/// Fill of the clicked concept itself.
pub const NODE_ACCENT: Rgb = Rgb::new(0xeb, 0x93, 0x16);
/// Circle outline.
pub const NODE_STROKE: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Continuous color ramp over the lattice's observed level range.
///
/// The domain runs from 0 to the bottom node's level, matching the original
/// scale even though document levels start at 1.
#[derive(Debug, Clone, Copy)]
pub struct LevelRamp {
    bottom_level: f32,
}

impl LevelRamp {
    pub fn new(lattice: &ConceptLattice) -> Self {
        Self {
            bottom_level: lattice.bottom_level() as f32,
        }
    }

    pub fn color_for_level(&self, level: u32) -> Rgb {
        if self.bottom_level <= 0.0 {
            return LEVEL_RAMP_TOP;
        }
        LEVEL_RAMP_TOP.lerp(LEVEL_RAMP_BOTTOM, level as f32 / self.bottom_level)
    }
}
