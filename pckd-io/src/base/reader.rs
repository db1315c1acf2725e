use anyhow::Result;
use pckd_core::containers::MergedGeometryBuffer;
use pckd_core::meta::Metadata;

/// Base trait for all types that can decode a point cloud container into a [MergedGeometryBuffer]
pub trait GeometryReader {
    /// Decodes the whole container into a `MergedGeometryBuffer` with the given display `name`. Either all
    /// geometry is returned or an error, never a partially filled buffer
    fn read_geometry(&mut self, name: &str) -> Result<MergedGeometryBuffer>;

    /// Returns the `Metadata` of the associated `GeometryReader`
    fn get_metadata(&self) -> &dyn Metadata;
}
