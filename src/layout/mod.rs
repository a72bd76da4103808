//! Layout engine: block placement, styling, and page composition.

mod composer;
mod engine;
mod options;
mod placed;

pub use composer::PageComposer;
pub use engine::{fit_image, LayoutEngine};
pub use options::{inches, LayoutOptions, POINTS_PER_INCH};
pub use placed::{
    Geometry, LaidOutDocument, Marker, Placement, PlacedBlock, PlacedPage, Primitive,
    StyledParagraph,
};
