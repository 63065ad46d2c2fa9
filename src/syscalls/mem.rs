// Memory readers
// All target reads go through the debugger with explicit byte counts and
// degrade gracefully on failure.

use crate::debug::Memory;
use crate::quote::decode_lossy;

/// Chunk size for NUL-terminated string reads; small enough to stay inside
/// a page when the string sits near an unmapped boundary.
const STRING_CHUNK: usize = 256;

/// Cap on NUL-terminated string reads.
pub const STRING_MAX: usize = 4096;

/// Cap on buffer reads.
pub const BUFFER_MAX: usize = 4096;

/// Cap on buffer reads under --no-abbrev.
pub const BUFFER_MAX_NO_ABBREV: usize = 65536;

/// Safety cap on argv/envp-style pointer arrays.
const PTR_ARRAY_MAX: usize = 1024;

/// Read a NUL-terminated string in chunks.
///
/// Returns None when the very first chunk is unreadable; a later failure
/// truncates to what was read. Invalid UTF-8 is preserved as `\xNN`.
pub fn read_cstring(mem: &dyn Memory, address: u64, max_len: usize) -> Option<String> {
    let mut bytes: Vec<u8> = Vec::new();
    let mut offset = 0usize;

    while offset < max_len {
        let want = STRING_CHUNK.min(max_len - offset);
        let chunk = match mem.read_memory(address + offset as u64, want) {
            Ok(chunk) => chunk,
            Err(_) if offset == 0 => return None,
            Err(_) => break,
        };

        match chunk.iter().position(|&b| b == 0) {
            Some(nul) => {
                bytes.extend_from_slice(&chunk[..nul]);
                break;
            }
            None => {
                offset += chunk.len();
                bytes.extend_from_slice(&chunk);
            }
        }
    }

    Some(decode_lossy(&bytes))
}

/// Read exactly `len` bytes, or nothing.
pub fn read_exact(mem: &dyn Memory, address: u64, len: usize) -> Option<Vec<u8>> {
    mem.read_memory(address, len).ok()
}

/// Read a NULL-terminated array of 8-byte pointers (argv/envp style).
pub fn read_ptr_array(mem: &dyn Memory, address: u64) -> Vec<u64> {
    let mut ptrs = Vec::new();
    for i in 0..PTR_ARRAY_MAX {
        let slot = address + (i as u64) * 8;
        let Some(bytes) = read_exact(mem, slot, 8) else {
            break;
        };
        let Ok(raw) = <[u8; 8]>::try_from(bytes) else {
            break;
        };
        let ptr = u64::from_le_bytes(raw);
        if ptr == 0 {
            break;
        }
        ptrs.push(ptr);
    }
    ptrs
}

/// Read `count` little-endian signed 32-bit integers.
pub fn read_i32_array(mem: &dyn Memory, address: u64, count: usize) -> Option<Vec<i32>> {
    let bytes = read_exact(mem, address, count * 4)?;
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

pub fn read_u64(mem: &dyn Memory, address: u64) -> Option<u64> {
    let bytes = read_exact(mem, address, 8)?;
    Some(u64::from_le_bytes(bytes.try_into().ok()?))
}

pub fn read_i64(mem: &dyn Memory, address: u64) -> Option<i64> {
    read_u64(mem, address).map(|v| v as i64)
}

pub fn read_i32(mem: &dyn Memory, address: u64) -> Option<i32> {
    let bytes = read_exact(mem, address, 4)?;
    Some(i32::from_le_bytes(bytes.try_into().ok()?))
}

pub fn read_u32(mem: &dyn Memory, address: u64) -> Option<u32> {
    read_i32(mem, address).map(|v| v as u32)
}

// Little-endian field accessors for decoding structs out of a byte image.

pub fn u8_at(data: &[u8], offset: usize) -> u8 {
    data.get(offset).copied().unwrap_or(0)
}

pub fn u16_at(data: &[u8], offset: usize) -> u16 {
    match data.get(offset..offset + 2) {
        Some(b) => u16::from_le_bytes([b[0], b[1]]),
        None => 0,
    }
}

pub fn i16_at(data: &[u8], offset: usize) -> i16 {
    u16_at(data, offset) as i16
}

pub fn u32_at(data: &[u8], offset: usize) -> u32 {
    match data.get(offset..offset + 4) {
        Some(b) => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        None => 0,
    }
}

pub fn i32_at(data: &[u8], offset: usize) -> i32 {
    u32_at(data, offset) as i32
}

pub fn u64_at(data: &[u8], offset: usize) -> u64 {
    match data.get(offset..offset + 8) {
        Some(b) => u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
        None => 0,
    }
}

pub fn i64_at(data: &[u8], offset: usize) -> i64 {
    u64_at(data, offset) as i64
}
