//! Account address and FIR id helpers.

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// `0x` followed by exactly 40 hex digits. Mixed-case checksums are not
/// verified.
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// `0x1234...abcd`, or "Not Assigned" for the empty or zero address.
pub fn format_address(address: &str) -> String {
    if address.is_empty() || same_address(address, ZERO_ADDRESS) {
        return "Not Assigned".to_string();
    }
    shorten_address(address)
}

/// First six and last four characters; short inputs are returned unchanged.
pub fn shorten_address(address: &str) -> String {
    match (address.get(..6), address.get(address.len().saturating_sub(4)..)) {
        (Some(head), Some(tail)) if address.len() > 10 => format!("{head}...{tail}"),
        _ => address.to_string(),
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirIdError {
    #[error("Please enter an FIR ID.")]
    Missing,
    #[error("FIR ID must be a positive number.")]
    Invalid,
}

/// Accepts only plain decimal digits with a value above zero.
pub fn parse_fir_id(raw: &str) -> Result<u64, FirIdError> {
    if raw.is_empty() {
        return Err(FirIdError::Missing);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FirIdError::Invalid);
    }
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(FirIdError::Invalid),
    }
}
