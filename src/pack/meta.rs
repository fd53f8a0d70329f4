//! Loads and validates the descriptor file that identifies a pack and the
//! schema version it was built for.

use std::path::Path;

use eyre::{Result, WrapErr};

/// The pack schema version this build expects.
pub const PACK_VERSION: i32 = 1;

/// The author recorded when the descriptor doesn't name one.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Sentinel for a `pack-version` value that was missing or unparseable. Both
/// cases fail validation identically.
const MALFORMED_VERSION: i32 = -1;

/// A validated pack descriptor. Construction either succeeds fully through
/// [`PackDescriptor::load`] or yields nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackDescriptor {
    pub name: String,
    pub author: String,
    pub version: i32,
}

impl PackDescriptor {
    /// Parses and validates descriptor `lines`, read from `path` (used only
    /// for diagnostics).
    ///
    /// The format is one `key=value` per line; blank lines and lines starting
    /// with `#` are skipped, and unrecognised keys are ignored so old builds
    /// can read newer descriptors. Validation requires a `name`, a parseable
    /// `pack-version`, and an exact match against `expected_version` - a pack
    /// built for a newer schema is just as unloadable as one built for an
    /// older schema. Failures are logged and yield `None`.
    pub fn load<'a>(
        path: &Path,
        lines: impl IntoIterator<Item = &'a str>,
        expected_version: i32,
    ) -> Option<PackDescriptor> {
        let mut name = None;
        let mut author = None;
        let mut version = MALFORMED_VERSION;

        for line in lines {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Lines without a '=' count as unrecognised too.
            let (key, value) = match line.split_once('=') {
                Some(pair) => pair,
                None => continue,
            };

            match key.trim() {
                "name" => name = Some(value.trim().to_string()),
                "author" => author = Some(value.trim().to_string()),
                "pack-version" => {
                    version = value.trim().parse().unwrap_or(MALFORMED_VERSION);
                }

                _ => {}
            }
        }

        let name = match name {
            Some(name) => name,

            None => {
                log::warn!("Pack descriptor {:?} does not set 'name'.", path);
                return None;
            }
        };

        if version == MALFORMED_VERSION {
            log::warn!(
                "Pack descriptor {:?} has a missing or malformed 'pack-version'.",
                path
            );

            return None;
        }

        if version != expected_version {
            log::warn!(
                "Pack '{}' was built for schema version {}, but this build expects {}.",
                name,
                version,
                expected_version
            );

            return None;
        }

        Some(PackDescriptor {
            name,
            author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            version,
        })
    }

    /// Reads the descriptor file at `path`.
    fn try_read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Unable to read pack descriptor {:?}", path))
    }

    /// Reads and validates the descriptor file at `path`. I/O failures are
    /// logged and treated like any other invalid descriptor.
    pub fn load_file(path: &Path, expected_version: i32) -> Option<PackDescriptor> {
        let text = match PackDescriptor::try_read(path) {
            Ok(text) => text,

            Err(err) => {
                log::warn!("{:?}", err);
                return None;
            }
        };

        PackDescriptor::load(path, text.lines(), expected_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(lines: &[&str]) -> Option<PackDescriptor> {
        PackDescriptor::load(Path::new("pack.txt"), lines.iter().copied(), PACK_VERSION)
    }

    #[test]
    fn full_descriptor_loads() {
        let descriptor = load(&["name=Forest Set", "author=mika", "pack-version=1"]).unwrap();

        assert_eq!(descriptor.name, "Forest Set");
        assert_eq!(descriptor.author, "mika");
        assert_eq!(descriptor.version, PACK_VERSION);
    }

    #[test]
    fn author_defaults_to_unknown() {
        let descriptor = load(&["name=Forest Set", "pack-version=1"]).unwrap();
        assert_eq!(descriptor.author, "Unknown");
    }

    #[test]
    fn comments_blanks_and_unknown_keys_are_ignored() {
        let descriptor = load(&[
            "# forest pack",
            "",
            "name=Forest Set",
            "preview=cover.png",
            "not a key-value line",
            "pack-version=1",
        ])
        .unwrap();

        assert_eq!(descriptor.name, "Forest Set");
    }

    #[test]
    fn missing_name_fails() {
        assert_eq!(load(&["author=mika", "pack-version=1"]), None);
    }

    #[test]
    fn missing_or_malformed_version_fails() {
        assert_eq!(load(&["name=Forest Set"]), None);
        assert_eq!(load(&["name=Forest Set", "pack-version=one"]), None);
        assert_eq!(load(&["name=Forest Set", "pack-version="]), None);
    }

    #[test]
    fn version_mismatch_fails_in_both_directions() {
        assert_eq!(load(&["name=Forest Set", "pack-version=0"]), None);
        assert_eq!(load(&["name=Forest Set", "pack-version=2"]), None);
    }

    #[test]
    fn missing_file_fails() {
        let path = std::env::temp_dir().join("reskin-no-such-descriptor.txt");
        assert_eq!(PackDescriptor::load_file(&path, PACK_VERSION), None);
    }

    #[test]
    fn descriptor_file_loads_from_disk() {
        let path = std::env::temp_dir().join("reskin-meta-test-descriptor.txt");

        std::fs::write(&path, "name=Forest Set\npack-version=1\n").unwrap();
        let descriptor = PackDescriptor::load_file(&path, PACK_VERSION);
        let _ = std::fs::remove_file(&path);

        assert_eq!(descriptor.unwrap().name, "Forest Set");
    }
}
