pub mod geom;
pub mod model;
pub mod normalize;
pub mod report;
pub mod scene;
pub mod view;
