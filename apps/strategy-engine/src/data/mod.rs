//! Caches owned by the calling data layer.

mod lot_size;

pub use lot_size::LotSizeCache;
