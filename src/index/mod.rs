/// Global symbol index over every message in a descriptor set.
///
/// Built once per run from all provided files, including files that are only
/// present as imports, so that schema messages can be linked across files.
mod builder;

pub use builder::{build_index, SymbolIndex};
