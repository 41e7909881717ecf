//! Memory Backends.
//!
//! Two `MemoryPort` implementations: a plain flat byte store and a variant
//! that layers DRAM row-buffer accounting on top of it. Accesses outside
//! the backing store read as zero and dropped writes are counted, never
//! fatal — the tile's address space is larger than any configured backing
//! store and the engine must stay total over it.

use crate::soc::ports::MemoryPort;

/// Flat little-endian byte store starting at address zero.
pub struct FlatMemory {
    bytes: Vec<u8>,
    reads: u64,
    writes: u64,
    dropped_writes: u64,
}

impl FlatMemory {
    /// Creates a zero-filled store of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
            reads: 0,
            writes: 0,
            dropped_writes: 0,
        }
    }

    /// Size of the backing store in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the backing store has zero length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of writes dropped for falling outside the backing store.
    pub fn dropped_writes(&self) -> u64 {
        self.dropped_writes
    }
}

impl MemoryPort for FlatMemory {
    fn read32(&mut self, addr: u32) -> u32 {
        self.reads += 1;
        let i = addr as usize;
        if i + 4 > self.bytes.len() {
            return 0;
        }
        u32::from_le_bytes([
            self.bytes[i],
            self.bytes[i + 1],
            self.bytes[i + 2],
            self.bytes[i + 3],
        ])
    }

    fn write32(&mut self, addr: u32, value: u32) {
        self.writes += 1;
        let i = addr as usize;
        if i + 4 > self.bytes.len() {
            self.dropped_writes += 1;
            return;
        }
        self.bytes[i..i + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn describe(&self) -> String {
        format!("flat ({} KiB)", self.bytes.len() / 1024)
    }

    fn report(&self) {
        println!(
            "[Mem] reads={} writes={} dropped_writes={}",
            self.reads, self.writes, self.dropped_writes
        );
    }
}

/// Flat store with DRAM row-buffer latency accounting.
///
/// Tracks the open row per access and accumulates what the access would
/// have cost on a real part (t_cas on a row hit, t_ras+t_cas on an empty
/// bank, t_pre+t_ras+t_cas after a row conflict). The engine is never
/// stalled; the totals are reported at teardown.
pub struct DramMemory {
    store: FlatMemory,
    last_row: Option<u32>,
    t_cas: u64,
    t_ras: u64,
    t_pre: u64,
    row_mask: u32,
    row_hits: u64,
    row_misses: u64,
    modeled_latency: u64,
}

impl DramMemory {
    /// Creates a DRAM-modelled store.
    ///
    /// `row_size` must be a power of two; it determines how addresses map
    /// onto rows.
    pub fn new(size: usize, row_size: u32, t_cas: u64, t_ras: u64, t_pre: u64) -> Self {
        Self {
            store: FlatMemory::new(size),
            last_row: None,
            t_cas,
            t_ras,
            t_pre,
            row_mask: !(row_size.wrapping_sub(1)),
            row_hits: 0,
            row_misses: 0,
            modeled_latency: 0,
        }
    }

    fn account(&mut self, addr: u32) {
        let row = addr & self.row_mask;
        let latency = match self.last_row {
            Some(open) if open == row => {
                self.row_hits += 1;
                self.t_cas
            }
            Some(_) => {
                self.row_misses += 1;
                self.last_row = Some(row);
                self.t_pre + self.t_ras + self.t_cas
            }
            None => {
                self.row_misses += 1;
                self.last_row = Some(row);
                self.t_ras + self.t_cas
            }
        };
        self.modeled_latency += latency;
    }

    /// Total latency the row model attributed to the run, in DRAM cycles.
    pub fn modeled_latency(&self) -> u64 {
        self.modeled_latency
    }

    /// Row-buffer hit and miss counts.
    pub fn row_stats(&self) -> (u64, u64) {
        (self.row_hits, self.row_misses)
    }
}

impl MemoryPort for DramMemory {
    fn read32(&mut self, addr: u32) -> u32 {
        self.account(addr);
        self.store.read32(addr)
    }

    fn write32(&mut self, addr: u32, value: u32) {
        self.account(addr);
        self.store.write32(addr, value);
    }

    fn describe(&self) -> String {
        format!(
            "dram-model ({} KiB, t_cas={} t_ras={} t_pre={})",
            self.store.len() / 1024,
            self.t_cas,
            self.t_ras,
            self.t_pre
        )
    }

    fn report(&self) {
        self.store.report();
        let total = self.row_hits + self.row_misses;
        let rate = if total > 0 {
            (self.row_hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "[Mem] row_hits={} row_misses={} hit_rate={:.2}% modeled_latency={} cycles",
            self.row_hits, self.row_misses, rate, self.modeled_latency
        );
    }
}
