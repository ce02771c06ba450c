// Domain layer: entities and ports. No dependencies on adapters or infrastructure.

pub mod model;
pub mod ports;

pub use model::MyObject;
pub use ports::MyObjectRepository;
