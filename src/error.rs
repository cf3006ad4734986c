use {crate::hex::InvalidHex, core::fmt, thiserror::Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
	Tile,
	MapRow,
	MapColumn,
	PaletteSlot,
	Scale,
}

impl fmt::Display for IndexKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Tile => "tile",
			Self::MapRow => "map row",
			Self::MapColumn => "map column",
			Self::PaletteSlot => "palette slot",
			Self::Scale => "swatch scale",
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLocation {
	Line(usize),
	Address(usize),
}

impl fmt::Display for RecordLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Line(i) => write!(f, "line {}", i + 1),
			Self::Address(address) => write!(f, "address {address}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("section {section}: {}", missingTag(.unterminated))]
	SectionNotFound { section: String, unterminated: bool },

	#[error("section {section}, {at}: malformed record {text:?}")]
	MalformedRecord { section: String, at: RecordLocation, text: String },

	#[error("section {section}, address {address}: {source}")]
	MalformedHex { section: String, address: usize, source: InvalidHex },

	#[error("section {section}: no record at address {address}")]
	MissingRecord { section: String, address: usize },

	#[error("{kind} index {index} out of range 0..{len}")]
	IndexOutOfRange { kind: IndexKind, index: usize, len: usize },
}

fn missingTag(&unterminated: &bool) -> &'static str {
	if unterminated {
		"closing tag not found"
	} else {
		"not found"
	}
}

impl DecodeError {
	pub(crate) fn malformedHex(section: &str, address: usize) -> impl Fn(InvalidHex) -> Self + '_ {
		move |source| Self::MalformedHex { section: section.into(), address, source }
	}

	pub(crate) fn malformedRecord(section: &str, address: usize, text: &str) -> Self {
		Self::MalformedRecord { section: section.into(), at: RecordLocation::Address(address), text: text.into() }
	}

	pub(crate) fn checkedGet<T>(slice: &[T], index: usize, kind: IndexKind) -> Result<&T, Self> {
		slice.get(index).ok_or(Self::IndexOutOfRange { kind, index, len: slice.len() })
	}
}
