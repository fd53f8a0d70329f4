//! Cache and lookup core for resource packs: descriptor loading, the sprite
//! atlas that survives the host invalidating its handles, and the prefix trie
//! and TTL cache utilities used around the rest of the mod.

pub mod cache;
pub mod host;
pub mod logging;
pub mod pack;
pub mod trie;

pub use cache::ExpiringCache;
pub use host::{MeshKind, SheetRegion, SpriteHost, SpriteParams};
pub use pack::{load_pack, AtlasEntry, LoadedPack, PackDescriptor, ResourceAtlas, PACK_VERSION};
pub use trie::PrefixTrie;
