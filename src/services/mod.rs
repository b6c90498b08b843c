// Service module exports

pub mod event_source;
pub mod gesture;
pub mod grid;
pub mod layout;
pub mod month;
pub mod settings;
pub mod view;
