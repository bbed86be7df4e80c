// Shared by-id persistence helpers for the three entity workflows

pub mod traits;

pub use traits::Resource;
