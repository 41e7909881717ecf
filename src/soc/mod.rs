//! Platform components around the core: memory backends, the CUSTOM-0
//! accelerator ports, and the builder that wires them together.

/// CUSTOM-0 accelerator implementations.
pub mod accel;

/// System assembly from configuration.
pub mod builder;

/// Memory backends.
pub mod memory;

/// Port traits and shared handle aliases.
pub mod ports;

pub use accel::{ArraySumAccel, DemoAddAccel};
pub use builder::System;
pub use memory::{DramMemory, FlatMemory};
pub use ports::{AccelPort, MemoryPort, SharedAccel, SharedMemory};
