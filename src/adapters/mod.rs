// Adapters layer: concrete implementations of the domain ports.

pub mod repository;

pub use repository::MyObjectRepositoryAdapter;
