/// Bound for the item ids a [`crate::ListController`] tracks.
///
/// Ids are cloned into size-reporting events, so they must be `Clone` on top of the bounds the
/// core engine needs.
pub trait ListKey: vlist::KeyCacheKey + Clone {}
impl<K: vlist::KeyCacheKey + Clone> ListKey for K {}
