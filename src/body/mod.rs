// body/mod.rs: the procedurally built figure: geometry, meshes, registries, layout.
pub mod geometry;
pub mod layout;
pub mod mesh;
pub mod model;

pub use layout::build_figure;
pub use model::{BodyModel, MaterialState, PartId, PartKind};
