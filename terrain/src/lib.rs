#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static terrain of a worms world and the spatial queries built on top of it.
//!
//! [`TerrainMap`] owns the passability bitmap and converts between world
//! coordinates and grid cells. [`TerrainView`] is a cheap copyable handle that
//! answers the sampling questions the physics systems ask: whether a circle
//! fits, whether a body rests on the ground, how far it may travel and how
//! steep the ground ahead is.

mod map;
mod spatial;

pub use map::{TerrainMap, EDGE_EPSILON};
pub use spatial::TerrainView;
