/// Display-only fingerprint shown next to an uploaded FIR.
///
/// A 32-bit shift-and-subtract accumulator over UTF-16 code units, rendered as
/// eight hex digits repeated eight times so it has the length of a SHA-256
/// digest. It is not collision resistant and must not be used for integrity
/// checks.
pub fn display_checksum(input: &str) -> String {
    if input.is_empty() {
        return "0".to_string();
    }

    let hash = input.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    });

    format!("{:08x}", i64::from(hash).abs()).repeat(8)
}
