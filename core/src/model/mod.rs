pub mod event;
pub mod phase;
