// Application layer: use cases orchestrating domain ports.

pub mod my_object_use_case;

pub use my_object_use_case::MyObjectUseCase;
