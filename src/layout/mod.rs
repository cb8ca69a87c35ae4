//! Grid layout: pair index + orientation → world position.

mod grid;

pub use grid::GridLayout;
