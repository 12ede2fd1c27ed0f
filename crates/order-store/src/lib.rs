pub mod memory;
pub mod retailer;

pub use memory::InMemoryOrderRepository;
pub use retailer::InMemoryRetailerRepository;
