//! Pack loading: validates a pack's descriptor and, if it checks out, builds
//! the sprite atlas for the pack's sheets.

mod atlas;
mod meta;

pub use atlas::{AtlasEntry, ResourceAtlas};
pub use meta::{PackDescriptor, PACK_VERSION};

use std::path::Path;

use crate::host::{SpriteHost, SpriteParams};

/// A successfully loaded pack: who it is, and its sprites.
pub struct LoadedPack<H: SpriteHost> {
    pub descriptor: PackDescriptor,
    pub atlas: ResourceAtlas<H>,
}

/// Loads the pack described by the file at `descriptor_path`, building an
/// atlas over `sheets` if the descriptor is valid for `expected_version`.
///
/// Returns `None` if the descriptor is missing, malformed, or built for a
/// different schema version; the reason is logged. No sprites are created
/// unless validation passes.
pub fn load_pack<H: SpriteHost>(
    host: &mut H,
    descriptor_path: &Path,
    expected_version: i32,
    sheets: Vec<(H::Sheet, Vec<AtlasEntry>)>,
    params: SpriteParams,
) -> Option<LoadedPack<H>> {
    let descriptor = PackDescriptor::load_file(descriptor_path, expected_version)?;

    log::info!(
        "Loading pack '{}' by {} ({} sheet(s)).",
        descriptor.name,
        descriptor.author,
        sheets.len()
    );

    let atlas = ResourceAtlas::build(host, sheets, params);

    Some(LoadedPack { descriptor, atlas })
}

#[cfg(test)]
mod tests {
    use super::atlas::testing::{entry, FakeHost};
    use super::*;

    fn write_descriptor(file_name: &str, text: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, text).unwrap();

        path
    }

    #[test]
    fn valid_descriptor_yields_a_loaded_pack() {
        let path = write_descriptor(
            "reskin-pack-test-valid.txt",
            "name=Forest Set\nauthor=mika\npack-version=1\n",
        );

        let mut host = FakeHost::new();

        let pack = load_pack(
            &mut host,
            &path,
            PACK_VERSION,
            vec![('A', vec![entry("ui/gold_coin", 0)])],
            SpriteParams::default(),
        );

        let _ = std::fs::remove_file(&path);

        let mut pack = pack.unwrap();
        assert_eq!(pack.descriptor.name, "Forest Set");
        assert!(pack.atlas.try_get_sprite(&mut host, "ui/gold_coin").is_some());
    }

    #[test]
    fn rejected_descriptor_creates_no_sprites() {
        let path = write_descriptor(
            "reskin-pack-test-mismatch.txt",
            "name=Forest Set\npack-version=9\n",
        );

        let mut host = FakeHost::new();

        let pack = load_pack(
            &mut host,
            &path,
            PACK_VERSION,
            vec![('A', vec![entry("ui/gold_coin", 0)])],
            SpriteParams::default(),
        );

        let _ = std::fs::remove_file(&path);

        assert!(pack.is_none());
        assert!(host.creations.is_empty());
    }
}
