pub mod form;
mod menubar;
pub mod side_panel;
