pub mod slots;
pub mod store;

pub use slots::FileSlot;
pub use slots::StorageSlot;
pub use slots::VolatileSlot;
pub use store::TokenSessionStore;
