//! High-level orchestration layer over the codec, the differ and the unit
//! client seam. Intentionally thin: exposes stable entry points used by the
//! CLI without re-implementing any of the pure components.

pub use ailoc_core::{FlatMap, Result, SectionMap, UnitTranslator};

pub mod missing;
pub mod translate;

pub use missing::find_missing_keys;
pub use translate::{plan, translate_all, TranslateOptions};
