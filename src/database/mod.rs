pub mod connection;
pub mod memory;
pub mod mongo;
pub mod store;

pub use connection::*;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::*;
