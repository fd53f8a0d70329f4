//! Builds and serves the path-to-sprite index for a loaded pack, and keeps it
//! serviceable when the engine destroys sprite wrappers behind our back.

use case_insensitive_hashmap::CaseInsensitiveHashMap;
use itertools::Itertools;

use crate::host::{SheetRegion, SpriteHost, SpriteParams};

/// One named resource within a sheet: the path the game will ask for and the
/// region of the sheet that holds its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasEntry {
    pub path: String,
    pub region: SheetRegion,
}

/// Where a sprite's pixels live: which of the atlas's sheets, and where in it.
/// Enough to rebuild the sprite without searching anything.
#[derive(Clone, Copy)]
struct SpriteSource {
    sheet: usize,
    region: SheetRegion,
}

/// The sprite index for one pack.
///
/// Sprites are created eagerly for every entry at construction time and owned
/// by the atlas until `destroy`; the engine only ever holds non-owning copies
/// handed out by `try_get_sprite`. Paths are matched case-insensitively, the
/// same way the game treats resource names.
pub struct ResourceAtlas<H: SpriteHost> {
    /// The sheets the sprites were cut from, owned so invalidated sprites can
    /// be rebuilt.
    sheets: Vec<H::Sheet>,

    /// Maps resource paths to their current sprites. Values are replaced when
    /// a sprite is found dead; keys never change after construction.
    sprites: CaseInsensitiveHashMap<H::Sprite>,

    /// Maps the same paths to the source each sprite was built from.
    sources: CaseInsensitiveHashMap<SpriteSource>,

    params: SpriteParams,
    destroyed: bool,
}

impl<H: SpriteHost> ResourceAtlas<H> {
    /// Creates one sprite per entry in every sheet and indexes them by path.
    ///
    /// Duplicate paths are a caller error; they resolve deterministically to
    /// the later sheet, and the displaced sprite is released.
    pub fn build(
        host: &mut H,
        sheets: Vec<(H::Sheet, Vec<AtlasEntry>)>,
        params: SpriteParams,
    ) -> ResourceAtlas<H> {
        let mut atlas = ResourceAtlas {
            sheets: Vec::with_capacity(sheets.len()),
            sprites: CaseInsensitiveHashMap::new(),
            sources: CaseInsensitiveHashMap::new(),
            params,
            destroyed: false,
        };

        for (sheet, entries) in sheets {
            let sheet_index = atlas.sheets.len();
            atlas.sheets.push(sheet);

            for entry in entries {
                let sprite =
                    host.create_sprite(&atlas.sheets[sheet_index], entry.region, params);

                // The engine must not reclaim pack sprites when a scene is
                // torn down; their lifetime is ours.
                host.persist(&sprite);

                if let Some(displaced) = atlas.sprites.insert(entry.path.clone(), sprite) {
                    log::warn!(
                        "Multiple sheets define '{}'; keeping the later one.",
                        entry.path
                    );

                    host.release_sprite(&displaced);
                }

                atlas.sources.insert(
                    entry.path,
                    SpriteSource {
                        sheet: sheet_index,
                        region: entry.region,
                    },
                );
            }
        }

        atlas
    }

    /// Returns the sprite for `path`, or `None` if the path is unknown or the
    /// atlas has been destroyed.
    ///
    /// If the engine has invalidated the stored sprite, an equivalent one is
    /// rebuilt from the recorded sheet and region, stored over the stale
    /// entry, and returned. Only that path's own sheet is touched.
    pub fn try_get_sprite(&mut self, host: &mut H, path: &str) -> Option<H::Sprite> {
        if self.destroyed {
            return None;
        }

        {
            let sprite = self.sprites.get(path)?;

            if host.is_alive(sprite) {
                return Some(sprite.clone());
            }
        }

        // The engine destroyed the wrapper without telling us. The pixel data
        // still exists, so an identical sprite can be cut from the sheet
        // again.
        let source = *self.sources.get(path)?;

        let rebuilt = host.create_sprite(&self.sheets[source.sheet], source.region, self.params);
        host.persist(&rebuilt);

        log::debug!("Rebuilt invalidated sprite for '{}'.", path);

        self.sprites.insert(path, rebuilt.clone());
        Some(rebuilt)
    }

    /// Releases every sprite and sheet this atlas owns and clears its indices.
    /// Lookups afterwards return `None`; destroying twice does nothing extra.
    pub fn destroy(&mut self, host: &mut H) {
        if self.destroyed {
            return;
        }

        self.destroyed = true;

        for sprite in self.sprites.values() {
            host.release_sprite(sprite);
        }

        self.sprites.clear();
        self.sources.clear();

        for sheet in self.sheets.drain(..) {
            host.release_sheet(sheet);
        }
    }

    /// Returns the number of paths this atlas serves.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns every path this atlas serves, sorted. Useful for feeding a
    /// `PrefixTrie` with a pack's contents.
    pub fn paths(&self) -> Vec<String> {
        self.sources
            .keys()
            .map(|path| path.to_string())
            .sorted()
            .collect()
    }
}
