//! System assembly.
//!
//! Builds the memory backend and the optional CUSTOM-0 accelerator from the
//! configuration and hands them out as shared ports. The core and the
//! accelerator may both hold a handle to the same memory, so everything is
//! wired through `Rc<RefCell<..>>`.

use crate::config::{AccelKind, Config, MemoryKind};
use crate::soc::accel::{ArraySumAccel, DemoAddAccel};
use crate::soc::memory::{DramMemory, FlatMemory};
use crate::soc::ports::{SharedAccel, SharedMemory};
use std::cell::RefCell;
use std::rc::Rc;

/// The assembled platform: one memory port and at most one accelerator.
pub struct System {
    pub mem: SharedMemory,
    pub accel: Option<SharedAccel>,
}

impl System {
    /// Builds the system described by `config`.
    pub fn new(config: &Config) -> Self {
        let size = config.memory.size_val();

        let mem: SharedMemory = match config.memory.kind {
            MemoryKind::Flat => Rc::new(RefCell::new(FlatMemory::new(size))),
            MemoryKind::Dram => Rc::new(RefCell::new(DramMemory::new(
                size,
                config.memory.row_size,
                config.memory.t_cas,
                config.memory.t_ras,
                config.memory.t_pre,
            ))),
        };

        let accel: Option<SharedAccel> = match config.accelerator.kind {
            AccelKind::None => None,
            AccelKind::DemoAdd => Some(Rc::new(RefCell::new(DemoAddAccel::new()))),
            AccelKind::ArraySum => Some(Rc::new(RefCell::new(ArraySumAccel::new(mem.clone())))),
        };

        Self { mem, accel }
    }
}
