//! The home-slot function shared by every table.

/// 31-polynomial over the UTF-16 code units of `key`, in wrapping 32-bit
/// signed arithmetic. The sign bit may be set; callers mask it off.
pub fn string_hash(key: &str) -> i32 {
    let mut h = 0i32;
    for unit in key.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    h
}

/// Slot a key hashes to before any probing. `capacity` must be non-zero.
#[inline]
pub fn home_slot(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    ((string_hash(key) & 0x7fff_ffff) as usize) % capacity
}
