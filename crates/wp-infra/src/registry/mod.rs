mod memory;

pub use memory::InMemoryElementRegistry;
