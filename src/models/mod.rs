// Module exports for models

pub mod event;
pub mod grid;
pub mod layout;
pub mod month;
pub mod preferences;
pub mod settings;
pub mod view;
