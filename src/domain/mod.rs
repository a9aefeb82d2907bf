// Domain layer: entities, ports and the booking service. Persistence lives in `adapters`.

pub mod describe;
pub mod model;
pub mod ports;
pub mod queries;
pub mod rules;
pub mod services;

pub use model::*;
pub use ports::*;
