use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a hex number")]
pub struct InvalidHex(pub String);

// unlike u32::from_str_radix, no leading sign
pub fn hexToInt(s: &str) -> Result<u32, InvalidHex> {
	if s.is_empty() {
		return Err(InvalidHex(s.into()));
	}
	s.chars().try_fold(0_u32, |acc, c| {
		c.to_digit(16)
			.and_then(|digit| acc.checked_mul(16)?.checked_add(digit))
			.ok_or_else(|| InvalidHex(s.into()))
	})
}

// "1f" is 0xF1
pub fn hexToIntSwapped(pair: &str) -> Result<u32, InvalidHex> {
	match pair.as_bytes() {
		&[low, high] if low.is_ascii_hexdigit() && high.is_ascii_hexdigit() => {
			hexToInt(&String::from_iter([high as char, low as char]))
		}
		_ => Err(InvalidHex(pair.into())),
	}
}

pub fn hexChunks(payload: &str, chunkLen: usize) -> Result<impl Iterator<Item = &str>, InvalidHex> {
	if !payload.is_ascii() {
		return Err(InvalidHex(payload.into()));
	}
	// ASCII, so any byte boundary is a char boundary
	Ok(payload.as_bytes().chunks(chunkLen).map(|chunk| unsafe { core::str::from_utf8_unchecked(chunk) }))
}
