//! Flat binary loader.
//!
//! Reads a raw program image from disk and places it in simulated memory as
//! little-endian words. There is no object format: whatever bytes are in the
//! file land at the load address, and a short tail is zero-padded to a word.

use crate::soc::ports::SharedMemory;
use std::fs;
use std::process;

/// Loads a binary file from disk.
pub fn load_binary(path: &str) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read file '{}': {}", path, e);
        process::exit(1);
    })
}

/// Writes `data` into memory at `addr`, one little-endian word at a time.
pub fn load_image(mem: &SharedMemory, data: &[u8], addr: u32) {
    let mut port = mem.borrow_mut();
    for (i, chunk) in data.chunks(4).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        port.write32(addr.wrapping_add((i as u32) * 4), u32::from_le_bytes(word));
    }
    println!("[Loader] Loaded {} bytes @ {:#x}", data.len(), addr);
}

/// Writes a program given as words, used for the built-in demo image.
pub fn load_words(mem: &SharedMemory, words: &[u32], addr: u32) {
    let mut port = mem.borrow_mut();
    for (i, &word) in words.iter().enumerate() {
        port.write32(addr.wrapping_add((i as u32) * 4), word);
    }
}
