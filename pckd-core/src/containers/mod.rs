//! In-memory representation of decoded PCKD data.
//!
//! Decoding a container happens in two stages. First, every sub-cloud is read into a [`SubCloud`], which is
//! just a list of [`PointRecord`]s exactly as they appear in the file. Then all sub-clouds are merged by a
//! [`GeometryAccumulator`] into a single [`MergedGeometryBuffer`]: one flat array of positions, one flat array
//! of RGBA colors and a table of [`Partition`]s that remembers which vertex range came from which sub-cloud.
//!
//! Each partition is meant to be drawn separately, which is what [`DrawUnit`] describes: an index list with
//! point topology that covers exactly the vertices of one partition.
//!
//! ```
//! # use pckd_core::containers::*;
//! # use pckd_core::nalgebra::Vector3;
//! let record = PointRecord::new(Vector3::new(1.0, 2.0, 3.0), Vector3::z(), Vector3::new(10, 20, 30));
//! let sub_clouds = vec![
//!     SubCloud::from_points(vec![record; 3]),
//!     SubCloud::default(),
//!     SubCloud::from_points(vec![record; 2]),
//! ];
//! let buffer = assemble("example", sub_clouds);
//!
//! assert_eq!(5, buffer.vertex_count());
//! assert_eq!(
//!     &[Partition::new(0, 3), Partition::new(3, 0), Partition::new(3, 2)],
//!     buffer.partitions()
//! );
//! ```

mod sub_cloud;
pub use self::sub_cloud::*;

mod partition;
pub use self::partition::*;

mod geometry_buffer;
pub use self::geometry_buffer::*;

mod accumulator;
pub use self::accumulator::*;
