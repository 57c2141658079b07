//! Rendering and input: toolbar, plot, and the toolkit-independent scene
//! the plot draws from.

pub mod panels;
pub mod plot;
pub mod scene;
