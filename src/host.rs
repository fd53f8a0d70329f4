//! Abstracts the hosting engine's sprite and sheet capabilities behind a small
//! trait so the pack code can be driven by a real engine binding in the mod
//! and by a fake one in tests.

/// A named sub-rectangle within a sheet, measured in pixels from the sheet's
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// How the engine should build the render mesh for a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    /// A plain quad covering the whole region.
    FullRect,

    /// A mesh fitted to the region's opaque pixels.
    Tight,
}

/// The engine-side parameters a sprite is created with, beyond its region.
/// Reconstruction of an invalidated sprite reuses the same parameters, so two
/// sprites built from the same (sheet, region, params) are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteParams {
    /// The sprite's pivot as a fraction of its region, `(0.5, 0.5)` being the
    /// centre.
    pub pivot: (f32, f32),

    /// How many sheet pixels map to one world unit.
    pub pixels_per_unit: f32,

    /// How many pixels the mesh is extruded beyond the region's edge.
    pub extrude: u32,

    pub mesh: MeshKind,
}

impl Default for SpriteParams {
    fn default() -> SpriteParams {
        SpriteParams {
            pivot: (0.5, 0.5),
            pixels_per_unit: 100.0,
            extrude: 0,
            mesh: MeshKind::FullRect,
        }
    }
}

/// The capabilities the hosting engine must provide for pack sprites.
///
/// The engine may invalidate any sprite it has been handed at any time without
/// telling us; the wrapper object dies while the underlying pixel data lives
/// on. `is_alive` is therefore the engine's own liveness test (typically an
/// equality check against its destroyed sentinel), and `create_sprite` must be
/// deterministic in its inputs so a dead sprite can be rebuilt from the
/// recorded sheet and region alone.
pub trait SpriteHost {
    /// An owned sheet of packed images.
    type Sheet;

    /// An opaque renderable handle.
    type Sprite: Clone;

    /// Creates a sprite covering `region` of `sheet`.
    fn create_sprite(
        &mut self,
        sheet: &Self::Sheet,
        region: SheetRegion,
        params: SpriteParams,
    ) -> Self::Sprite;

    /// Returns whether the engine still considers `sprite` usable.
    fn is_alive(&self, sprite: &Self::Sprite) -> bool;

    /// Excludes `sprite` from the engine's ordinary scene-lifecycle cleanup,
    /// leaving its lifetime to whoever created it.
    fn persist(&mut self, sprite: &Self::Sprite);

    /// Releases `sprite` back to the engine.
    fn release_sprite(&mut self, sprite: &Self::Sprite);

    /// Releases an owned sheet back to the engine.
    fn release_sheet(&mut self, sheet: Self::Sheet);
}
