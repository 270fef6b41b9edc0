//! Utility functions for the container lifecycle

use crate::error::{Error, Result};

/// Check if a command is available in PATH
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Parse a docker-style memory quota ("2g", "512m", "1024k", "100b", "4096") to bytes
pub fn parse_memory(mem: &str) -> Result<i64> {
    let mem = mem.trim().to_lowercase();

    let (digits, multiplier) = match mem.char_indices().last() {
        Some((idx, 'g')) => (&mem[..idx], 1024 * 1024 * 1024),
        Some((idx, 'm')) => (&mem[..idx], 1024 * 1024),
        Some((idx, 'k')) => (&mem[..idx], 1024),
        Some((idx, 'b')) => (&mem[..idx], 1),
        Some(_) => (mem.as_str(), 1),
        None => return Err(Error::invalid_memory(mem.clone())),
    };

    let value: i64 = digits
        .parse()
        .map_err(|_| Error::invalid_memory(mem.clone()))?;

    if value <= 0 {
        return Err(Error::invalid_memory(mem.clone()));
    }

    value
        .checked_mul(multiplier)
        .ok_or_else(|| Error::invalid_memory(mem.clone()))
}
