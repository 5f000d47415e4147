mod memory;

pub use memory::InMemoryNavigator;
