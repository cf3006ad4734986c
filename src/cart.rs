use {
	crate::{
		hex::{hexChunks, hexToInt, hexToIntSwapped, InvalidHex},
		section::readSection,
		transform::PaletteTransform,
		DecodeError, IndexKind, NTILES, PALETTE_LEN, TILE_AREA,
	},
	array_macro::array,
	core::ops,
	log::{debug, warn},
	serde::Serialize,
};

pub const PALETTE: &str = "PALETTE";
pub const TILES: &str = "TILES";
pub const MAP: &str = "MAP";

// rrggbb
const COLOR_HEX_LEN: usize = 6;
const COMPONENT_HEX_LEN: usize = 2;
const TILE_HEX_LEN: usize = TILE_AREA;
const CELL_HEX_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Serialize for Rgb {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let Self([r, g, b]) = *self;
		serializer.collect_str(&format_args!("{r:02x}{g:02x}{b:02x}"))
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette(pub [Rgb; PALETTE_LEN]);

impl Palette {
	pub const BLACK: usize = 0;
	pub const TRANSPARENT: usize = 6;

	pub fn color(&self, index: usize) -> Result<Rgb, DecodeError> {
		DecodeError::checkedGet(&self.0, index, IndexKind::PaletteSlot).copied()
	}
}

impl ops::Index<usize> for Palette {
	type Output = Rgb;
	fn index(&self, index: usize) -> &Rgb {
		&self.0[index]
	}
}

impl ops::IndexMut<usize> for Palette {
	fn index_mut(&mut self, index: usize) -> &mut Rgb {
		&mut self.0[index]
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile(pub [u8; TILE_AREA]);

impl Default for Tile {
	fn default() -> Self {
		Self([Palette::BLACK as _; TILE_AREA])
	}
}

impl Tile {
	pub fn isBlank(&self) -> bool {
		*self == Self::default()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet(Box<[Tile; NTILES]>);

impl Default for TileSet {
	fn default() -> Self {
		Self(Box::new(array![_ => Tile::default(); NTILES]))
	}
}

impl TileSet {
	pub fn tile(&self, id: usize) -> Result<&Tile, DecodeError> {
		DecodeError::checkedGet(&self.0[..], id, IndexKind::Tile)
	}

	pub fn tiles(&self) -> &[Tile; NTILES] {
		&self.0
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileMap {
	rows: Vec<(usize, Vec<u8>)>,
}

impl TileMap {
	pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
		self.rows.iter().map(|(_, row)| row.as_slice())
	}

	pub fn addresses(&self) -> impl Iterator<Item = usize> + '_ {
		self.rows.iter().map(|&(address, _)| address)
	}

	pub fn height(&self) -> usize {
		self.rows.len()
	}

	pub fn width(&self) -> usize {
		self.rows().map(<[u8]>::len).max().unwrap_or(0)
	}

	pub fn cell(&self, x: usize, y: usize) -> Result<u8, DecodeError> {
		let (_, row) = DecodeError::checkedGet(&self.rows, y, IndexKind::MapRow)?;
		DecodeError::checkedGet(row, x, IndexKind::MapColumn).copied()
	}
}

pub fn decodePalette<S: AsRef<str>>(lines: &[S]) -> Result<Palette, DecodeError> {
	decodePaletteWith(lines, None)
}

pub fn decodePaletteWith<S: AsRef<str>>(
	lines: &[S],
	transform: Option<&dyn PaletteTransform>,
) -> Result<Palette, DecodeError> {
	const ADDRESS: usize = 0;
	let section = readSection(PALETTE, lines)?;
	let data = section.get(ADDRESS).ok_or(DecodeError::MissingRecord { section: PALETTE.into(), address: ADDRESS })?;
	if data.len() % COLOR_HEX_LEN != 0 || data.len() / COLOR_HEX_LEN > PALETTE_LEN {
		return Err(DecodeError::malformedRecord(PALETTE, ADDRESS, data));
	}

	let toHex = DecodeError::malformedHex(PALETTE, ADDRESS);
	let mut palette = Palette::default();
	for (slot, colorHex) in palette.0.iter_mut().zip(hexChunks(data, COLOR_HEX_LEN).map_err(&toHex)?) {
		*slot = parseColor(colorHex).map_err(&toHex)?;
	}
	if data.len() < PALETTE_LEN * COLOR_HEX_LEN {
		debug!("palette has {} of {PALETTE_LEN} colors, rest left black", data.len() / COLOR_HEX_LEN);
	}
	Ok(match transform {
		Some(transform) => transform.apply(palette),
		None => palette,
	})
}

fn parseColor(colorHex: &str) -> Result<Rgb, InvalidHex> {
	let mut components = [0; 3];
	for (component, hex) in components.iter_mut().zip(hexChunks(colorHex, COMPONENT_HEX_LEN)?) {
		*component = hexToInt(hex)? as _;
	}
	Ok(Rgb(components))
}

pub fn decodeTileSet<S: AsRef<str>>(lines: &[S]) -> Result<TileSet, DecodeError> {
	let section = readSection(TILES, lines)?;
	let mut tileSet = TileSet::default();
	for (address, data) in section.iter() {
		if data.len() != TILE_HEX_LEN {
			return Err(DecodeError::malformedRecord(TILES, address, data));
		}
		let tile = tileSet.0.get_mut(address).ok_or(DecodeError::IndexOutOfRange {
			kind: IndexKind::Tile,
			index: address,
			len: NTILES,
		})?;
		// one hex digit per pixel: the low nibble of each byte is the left pixel, and it's written first
		let toHex = DecodeError::malformedHex(TILES, address);
		for (pixel, digit) in tile.0.iter_mut().zip(hexChunks(data, 1).map_err(&toHex)?) {
			*pixel = hexToInt(digit).map_err(&toHex)? as _;
		}
	}
	debug!("{} of {NTILES} tiles present", section.len());
	Ok(tileSet)
}

pub fn decodeTileMap<S: AsRef<str>>(lines: &[S]) -> Result<TileMap, DecodeError> {
	let section = readSection(MAP, lines)?;
	let mut tileMap = TileMap { rows: Vec::with_capacity(section.len()) };
	for (address, data) in section {
		if data.len() % CELL_HEX_LEN != 0 {
			return Err(DecodeError::malformedRecord(MAP, address, data));
		}
		let row: Result<Vec<u8>, _> = hexChunks(data, CELL_HEX_LEN)
			.and_then(|cells| cells.map(|cell| hexToIntSwapped(cell).map(|tileId| tileId as u8)).collect());
		let row = row.map_err(DecodeError::malformedHex(MAP, address))?;
		let missing = missingRows(tileMap.addresses().last(), address);
		if !missing.is_empty() {
			warn!("map rows {missing:?} are missing; later rows move up");
		}
		tileMap.rows.push((address, row));
	}
	debug!("map: {} rows, {} columns", tileMap.height(), tileMap.width());
	Ok(tileMap)
}

fn missingRows(previous: Option<usize>, address: usize) -> ops::Range<usize> {
	previous.map_or(0, |previous| previous + 1)..address
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
	pub palette: Palette,
	pub tileSet: TileSet,
	pub tileMap: TileMap,
}

impl Cart {
	pub fn decode<S: AsRef<str>>(lines: &[S], transform: Option<&dyn PaletteTransform>) -> Result<Self, DecodeError> {
		Ok(Self {
			palette: decodePaletteWith(lines, transform)?,
			tileSet: decodeTileSet(lines)?,
			tileMap: decodeTileMap(lines)?,
		})
	}

	pub fn summary(&self) -> Summary {
		Summary {
			palette: self.palette,
			nonBlankTiles: (0..NTILES).filter(|&id| !self.tileSet.0[id].isBlank()).collect(),
			map: MapSummary {
				rows: self.tileMap.height(),
				columns: self.tileMap.width(),
				firstAddress: self.tileMap.addresses().next(),
				lastAddress: self.tileMap.addresses().last(),
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
	pub palette: Palette,
	pub nonBlankTiles: Vec<usize>,
	pub map: MapSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSummary {
	pub rows: usize,
	pub columns: usize,
	pub firstAddress: Option<usize>,
	pub lastAddress: Option<usize>,
}
