pub mod editor;
pub mod help;
pub mod layout;
pub mod modals;
pub mod status_bar;
