mod builder;
mod component;
mod drag;
mod edges;
mod layout;
mod preview;
mod render;
mod state;
#[cfg(test)]
mod testing;
mod types;
mod visibility;

pub use builder::build;
pub use component::HierarchyCanvas;
pub use edges::EdgeStyle;
pub use layout::LayoutConfig;
pub use types::NodeTable;
