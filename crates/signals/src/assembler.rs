use divergence_core::Divergence;

/// Concatenates both scan results, ordered by `(index_to, index_from)`.
///
/// The sort is stable and nothing is deduplicated: distinct pairs sharing an
/// end index all survive.
#[must_use]
pub fn assemble(bearish: Vec<Divergence>, bullish: Vec<Divergence>) -> Vec<Divergence> {
    let mut all = bearish;
    all.extend(bullish);
    all.sort_by_key(Divergence::sort_key);
    all
}
