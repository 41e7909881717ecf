//! Simulator configuration.
//!
//! Loaded from a TOML file; every field has a default so a partial file
//! (or none at all) still yields a runnable system. Addresses are written
//! as hex strings in the file and resolved through the `_val()` accessors.

use serde::Deserialize;

const DEFAULT_MEM_SIZE: usize = 0x10_0000;
const DEFAULT_ROW_SIZE: u32 = 2048;
const T_CAS: u64 = 14;
const T_RAS: u64 = 14;
const T_PRE: u64 = 14;

/// Top-level configuration. Sections mirror the assembly: run control,
/// program placement, memory backend, accelerator.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub accelerator: AcceleratorConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Per-cycle trace lines on stderr.
    #[serde(default)]
    pub trace: bool,

    /// Scheduler steps to run before stopping; 0 drops into the
    /// interactive debugger instead.
    #[serde(default)]
    pub steps: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            steps: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_start_pc")]
    pub start_pc: String,

    #[serde(default = "default_load_addr")]
    pub load_addr: String,
}

impl SystemConfig {
    pub fn start_pc_val(&self) -> u32 {
        parse_hex(&self.start_pc, 0)
    }

    pub fn load_addr_val(&self) -> u32 {
        parse_hex(&self.load_addr, 0)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            start_pc: default_start_pc(),
            load_addr: default_load_addr(),
        }
    }
}

/// Which memory backend to assemble.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MemoryKind {
    /// Plain flat store, no timing model.
    Flat,
    /// Flat store with DRAM row-buffer latency accounting.
    Dram,
}

#[derive(Debug, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_mem_kind")]
    pub kind: MemoryKind,

    #[serde(default = "default_mem_size")]
    pub size: String,

    #[serde(default = "default_row_size")]
    pub row_size: u32,

    #[serde(default = "default_t_cas")]
    pub t_cas: u64,

    #[serde(default = "default_t_ras")]
    pub t_ras: u64,

    #[serde(default = "default_t_pre")]
    pub t_pre: u64,
}

impl MemoryConfig {
    pub fn size_val(&self) -> usize {
        let s = self.size.trim_start_matches("0x");
        usize::from_str_radix(s, 16).unwrap_or(DEFAULT_MEM_SIZE)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            kind: default_mem_kind(),
            size: default_mem_size(),
            row_size: default_row_size(),
            t_cas: default_t_cas(),
            t_ras: default_t_ras(),
            t_pre: default_t_pre(),
        }
    }
}

/// Which accelerator (if any) to hang off CUSTOM-0.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AccelKind {
    /// No accelerator; CUSTOM-0 traps as an illegal instruction.
    None,
    /// Responds with rs1 + rs2.
    DemoAdd,
    /// Sums rs2 words of memory starting at rs1.
    ArraySum,
}

#[derive(Debug, Deserialize)]
pub struct AcceleratorConfig {
    #[serde(default = "default_accel_kind")]
    pub kind: AccelKind,
}

impl Default for AcceleratorConfig {
    fn default() -> Self {
        Self {
            kind: default_accel_kind(),
        }
    }
}

fn parse_hex(s: &str, default: u32) -> u32 {
    let s = s.trim_start_matches("0x");
    u32::from_str_radix(s, 16).unwrap_or(default)
}

fn default_start_pc() -> String {
    "0x0".to_string()
}

fn default_load_addr() -> String {
    "0x0".to_string()
}

fn default_mem_kind() -> MemoryKind {
    MemoryKind::Flat
}

fn default_mem_size() -> String {
    format!("{:#x}", DEFAULT_MEM_SIZE)
}

fn default_row_size() -> u32 {
    DEFAULT_ROW_SIZE
}

fn default_t_cas() -> u64 {
    T_CAS
}

fn default_t_ras() -> u64 {
    T_RAS
}

fn default_t_pre() -> u64 {
    T_PRE
}

fn default_accel_kind() -> AccelKind {
    AccelKind::None
}
