// Service module exports

pub mod event;
pub mod grid;
pub mod layout;
pub mod settings;
pub mod snap;
pub mod week;
