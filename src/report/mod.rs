pub mod text;

pub use text::render;
