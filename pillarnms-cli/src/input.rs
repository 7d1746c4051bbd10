//! Raw candidate dumps: little-endian `f32`, nine values per record.

use std::fs;
use std::path::Path;

/// Reinterprets a little-endian byte dump as `f32` values.
pub fn decode_f32_le(bytes: &[u8]) -> Result<Vec<f32>, String> {
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "candidate dump has {} bytes, which is not a whole number of f32 values",
            bytes.len()
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Reads a candidate dump from disk.
pub fn load_candidates(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let values = decode_f32_le(&bytes).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(values)
}
