//! Report rendering

mod renderer;

pub use renderer::{render, render_company};
