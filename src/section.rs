use {
	crate::{DecodeError, RecordLocation},
	log::debug,
	memchr::memchr,
	std::collections::{btree_map, BTreeMap},
};

pub const RECORD_PREFIX_LEN: usize = 3;

// sorted by address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section<'a> {
	pub name: String,
	records: BTreeMap<usize, &'a str>,
}

impl<'a> Section<'a> {
	pub fn get(&self, address: usize) -> Option<&'a str> {
		self.records.get(&address).copied()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
		self.records.iter().map(|(&address, &payload)| (address, payload))
	}
}

impl<'a> IntoIterator for Section<'a> {
	type Item = (usize, &'a str);
	type IntoIter = btree_map::IntoIter<usize, &'a str>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}

pub fn readSection<'a, S: AsRef<str>>(name: &str, lines: &'a [S]) -> Result<Section<'a>, DecodeError> {
	let (startTag, endTag) = (format!("-- <{name}>"), format!("-- </{name}>"));
	let notFound = |unterminated| DecodeError::SectionNotFound { section: name.into(), unterminated };

	let mut lines = lines.iter().map(S::as_ref).enumerate();
	let start = lines.find(|(_, line)| line.starts_with(&startTag)).ok_or_else(|| notFound(false))?.0;
	let mut section = Section { name: name.into(), records: BTreeMap::new() };
	for (i, line) in lines {
		if line.starts_with(&endTag) {
			debug!("section {name}: lines {}..={}, {} records", start + 1, i + 1, section.len());
			return Ok(section);
		}
		let (address, payload) = parseRecord(line).ok_or_else(|| DecodeError::MalformedRecord {
			section: name.into(),
			at: RecordLocation::Line(i),
			text: line.into(),
		})?;
		section.records.insert(address, payload);
	}
	Err(notFound(true))
}

fn parseRecord(line: &str) -> Option<(usize, &str)> {
	let record = line.get(RECORD_PREFIX_LEN..)?;
	let colon = memchr(b':', record.as_bytes())?;
	let address = &record[..colon];
	if address.is_empty() || !address.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	Some((address.parse().ok()?, &record[colon + 1..]))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(text: &str) -> Vec<&str> {
		text.lines().collect()
	}

	#[test]
	fn reads_records_between_tags() {
		let cart = lines("-- title: x\n-- <TILES>\n-- 001:ab\n-- 000:cd\n-- </TILES>\n-- 002:ef\n");
		let section = readSection("TILES", &cart).unwrap();
		assert_eq!(section.name, "TILES");
		assert_eq!(section.len(), 2);
		assert_eq!(section.get(0), Some("cd"));
		assert_eq!(section.get(1), Some("ab"));
		assert_eq!(section.get(2), None);
		assert_eq!(section.iter().collect::<Vec<_>>(), [(0, "cd"), (1, "ab")]);
	}

	#[test]
	fn ignores_other_sections_and_finds_the_first_opener() {
		let cart = lines("-- <MAP>\n-- 000:11\n-- </MAP>\n-- <PALETTE>\n-- 000:22\n-- </PALETTE>\n-- <PALETTE>\n-- 000:33\n-- </PALETTE>");
		assert_eq!(readSection("PALETTE", &cart).unwrap().get(0), Some("22"));
		assert_eq!(readSection("MAP", &cart).unwrap().get(0), Some("11"));
	}

	#[test]
	fn empty_section_is_fine() {
		let cart = lines("-- <MAP>\n-- </MAP>");
		assert!(readSection("MAP", &cart).unwrap().is_empty());
	}

	#[test]
	fn later_duplicate_address_wins() {
		let cart = lines("-- <MAP>\n-- 003:aa\n-- 003:bb\n-- </MAP>");
		assert_eq!(readSection("MAP", &cart).unwrap().get(3), Some("bb"));
	}

	#[test]
	fn missing_opener_and_closer() {
		let cart = lines("-- <MAP>\n-- 000:00");
		assert_eq!(
			readSection("TILES", &cart),
			Err(DecodeError::SectionNotFound { section: "TILES".into(), unterminated: false })
		);
		assert_eq!(
			readSection("MAP", &cart),
			Err(DecodeError::SectionNotFound { section: "MAP".into(), unterminated: true })
		);
		assert!(readSection::<&str>("MAP", &[]).is_err());
	}

	#[test]
	fn malformed_records_report_line_and_text() {
		for bad in ["--", "-- 000", "-- abc:00", "-- :00", "-- -1:00"] {
			let cart = ["-- <MAP>", bad, "-- </MAP>"];
			assert_eq!(
				readSection("MAP", &cart),
				Err(DecodeError::MalformedRecord {
					section: "MAP".into(),
					at: RecordLocation::Line(1),
					text: bad.into()
				}),
				"{bad:?}"
			);
		}
	}

	#[test]
	fn payload_is_kept_verbatim() {
		let cart = ["-- <MAP>", "-- 7:", "-- 12:zz:", "-- </MAP>"];
		let section = readSection("MAP", &cart).unwrap();
		assert_eq!(section.get(7), Some(""));
		assert_eq!(section.get(12), Some("zz:"));
	}

	#[test]
	fn works_over_owned_lines() {
		let cart: Vec<String> = vec!["-- <MAP>".into(), "-- 000:01".into(), "-- </MAP>".into()];
		let section = readSection("MAP", &cart).unwrap();
		assert_eq!(section.into_iter().collect::<Vec<_>>(), [(0, "01")]);
	}
}
