use ailoc_core::FlatMap;

/// Reference keys absent from **every** comparison mapping, in reference
/// order. A key present in at least one comparison counts as covered even
/// when other comparisons lack it; with no comparisons, every reference key
/// is missing. This answers "which source strings were never translated
/// into any locale", not "which locale lags behind".
pub fn find_missing_keys(reference: &FlatMap, comparisons: &[FlatMap]) -> Vec<String> {
    reference
        .keys()
        .filter(|key| comparisons.iter().all(|c| !c.contains_key(key.as_str())))
        .cloned()
        .collect()
}
