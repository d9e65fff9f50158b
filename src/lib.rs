/// aggloclust: agglomerative hierarchical clustering in Rust
///
/// Bottom-up centroid-linkage clustering that merges the two nearest clusters
/// until a requested number of clusters remains.
///
/// # Modules
/// - `clustering`: cluster store, nearest-pair selection, merging and the two engines.
/// - `distances`: centroid distance metrics.
/// - `core`: numeric input trait and error types.
/// - `sample`: text sample reader.
pub mod clustering;
pub mod core;
pub mod distances;
pub mod sample;
