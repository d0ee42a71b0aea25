pub mod app;
pub mod combobox;
pub mod keys;
pub mod line_input;
pub mod picker;
pub mod render;
pub mod theme;

pub use app::run;
