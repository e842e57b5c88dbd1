//! Recorded object tracks: frames, point clouds, and the on-disk store.

mod frame;
mod point_cloud;
mod store;

pub use frame::{Frame, Track, planar_distance};
pub use point_cloud::{Point, PointCloud};
pub use store::TrackStore;
