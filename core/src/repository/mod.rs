pub mod memory;
pub mod traits;

// Re-export
pub use memory::InMemoryEventRepository;
pub use traits::EventRepository;
