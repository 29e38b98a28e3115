//! Item resolution: turning request tokens into dimension items through a
//! caller-supplied lookup.

use tracing::debug;

use crate::assemble::{DimensionError, DimensionResult};
use crate::id::scheme::IdScheme;
use crate::model::item::DimensionalItem;

/// Looks up a single dimension item by token under an id scheme. Implemented
/// by whatever metadata store backs the engine.
pub trait ItemResolver {
    fn resolve(&self, id_scheme: &IdScheme, token: &str) -> Option<DimensionalItem>;
}

/// Resolves every token, returning the found items and the tokens that
/// matched nothing.
pub fn resolve_items<R: ItemResolver + ?Sized>(
    resolver: &R,
    id_scheme: &IdScheme,
    tokens: &[String],
) -> (Vec<DimensionalItem>, Vec<String>) {
    let mut items = Vec::with_capacity(tokens.len());
    let mut misses = Vec::new();

    for token in tokens {
        match resolver.resolve(id_scheme, token) {
            Some(item) => items.push(item),
            None => {
                debug!(%token, %id_scheme, "dimension item did not resolve");
                misses.push(token.clone());
            }
        }
    }

    (items, misses)
}

/// Like [`resolve_items`], but the first unresolvable token is an error.
pub fn resolve_items_strict<R: ItemResolver + ?Sized>(
    resolver: &R,
    id_scheme: &IdScheme,
    tokens: &[String],
) -> DimensionResult<Vec<DimensionalItem>> {
    tokens
        .iter()
        .map(|token| {
            resolver
                .resolve(id_scheme, token)
                .ok_or_else(|| DimensionError::UnresolvedItem(token.clone()))
        })
        .collect()
}
