//! Code generation module

mod descriptor;
mod naming;
mod project;
mod templates;

pub use descriptor::{build_descriptor, render_descriptor};
pub use naming::*;
pub use project::*;
