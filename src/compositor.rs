use {
	crate::{
		cart::{Palette, TileMap, TileSet},
		image::Image,
		DecodeError, IndexKind, IMAGE_HEIGHT, IMAGE_WIDTH, PALETTE_LEN, TILE_SIZE,
	},
	glam::UVec2,
};

pub const SWATCH_COLUMNS: usize = 8;
const SWATCH_ROWS: usize = PALETTE_LEN / SWATCH_COLUMNS;
// 8192×2048 pixels at most
pub const MAX_SWATCH_SCALE: usize = 1024;

// a map that doesn't cover all 240×136 cells is an error, never clamped
pub fn compositeMap(tileSet: &TileSet, tileMap: &TileMap, palette: &Palette) -> Result<Image, DecodeError> {
	let mut image = Image::fromWidthHeight(IMAGE_WIDTH, IMAGE_HEIGHT);
	for y in 0..IMAGE_HEIGHT {
		for x in 0..IMAGE_WIDTH {
			let pixel = UVec2::new(x as _, y as _);
			let (cell, offset) = (pixel / TILE_SIZE as u32, pixel % TILE_SIZE as u32);
			let tileId = tileMap.cell(cell.x as _, cell.y as _)?;
			let paletteIndex = tileSet.tile(tileId.into())?.0[(offset.y * TILE_SIZE as u32 + offset.x) as usize];
			image.putPixel(x, y, palette.color(paletteIndex.into())?);
		}
	}
	Ok(image)
}

pub fn compositeTile(tileSet: &TileSet, palette: &Palette, tileId: usize) -> Result<Image, DecodeError> {
	let tile = tileSet.tile(tileId)?;
	let mut image = Image::fromWidthHeight(TILE_SIZE, TILE_SIZE);
	for (i, &paletteIndex) in tile.0.iter().enumerate() {
		image.putPixel(i % TILE_SIZE, i / TILE_SIZE, palette.color(paletteIndex.into())?);
	}
	Ok(image)
}

pub fn compositePaletteSwatch(palette: &Palette, scale: usize) -> Result<Image, DecodeError> {
	let outOfRange = DecodeError::IndexOutOfRange { kind: IndexKind::Scale, index: scale, len: MAX_SWATCH_SCALE + 1 };
	if !(1..=MAX_SWATCH_SCALE).contains(&scale) {
		return Err(outOfRange);
	}
	let mut image = SWATCH_COLUMNS
		.checked_mul(scale)
		.zip(SWATCH_ROWS.checked_mul(scale))
		.and_then(|(width, height)| Image::tryFromWidthHeight(width, height))
		.ok_or(outOfRange)?;
	for y in 0..image.height {
		for x in 0..image.width {
			image.putPixel(x, y, palette.color((y / scale) * SWATCH_COLUMNS + x / scale)?);
		}
	}
	Ok(image)
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::{
			cart::{decodeTileMap, decodeTileSet, Rgb},
			MAP_HEIGHT, MAP_WIDTH,
		},
	};

	fn rainbow() -> Palette {
		let mut palette = Palette::default();
		for (i, color) in palette.0.iter_mut().enumerate() {
			*color = Rgb([i as u8, 0x80, 0xFF - i as u8]);
		}
		palette
	}

	fn tileSet(tiles: &[(usize, &str)]) -> TileSet {
		let mut lines = vec!["-- <TILES>".to_owned()];
		lines.extend(tiles.iter().map(|(address, data)| format!("-- {address:03}:{data}")));
		lines.push("-- </TILES>".into());
		decodeTileSet(&lines).unwrap()
	}

	#[test]
	fn blank_tile_is_all_color_zero() {
		let (palette, tileSet) = (rainbow(), tileSet(&[]));
		let image = compositeTile(&tileSet, &palette, 200).unwrap();
		assert_eq!((image.width, image.height), (8, 8));
		for y in 0..8 {
			for x in 0..8 {
				assert_eq!(image.pixel(x, y), palette[0]);
			}
		}
	}

	#[test]
	fn tile_pixels_are_row_major() {
		let data = "0123456789abcdef".repeat(4);
		let (palette, tileSet) = (rainbow(), tileSet(&[(3, data.as_str())]));
		let image = compositeTile(&tileSet, &palette, 3).unwrap();
		assert_eq!(image.pixel(0, 0), palette[0]);
		assert_eq!(image.pixel(7, 0), palette[7]);
		assert_eq!(image.pixel(0, 1), palette[8]);
		assert_eq!(image.pixel(7, 7), palette[15]);
	}

	#[test]
	fn tile_id_past_the_set() {
		assert_eq!(
			compositeTile(&tileSet(&[]), &rainbow(), 256),
			Err(DecodeError::IndexOutOfRange { kind: IndexKind::Tile, index: 256, len: 256 })
		);
	}

	#[test]
	fn swatch_layout() {
		let palette = rainbow();
		let image = compositePaletteSwatch(&palette, 3).unwrap();
		assert_eq!((image.width, image.height), (24, 6));
		assert_eq!(image.pixel(0, 0), palette[0]);
		assert_eq!(image.pixel(2, 2), palette[0]);
		assert_eq!(image.pixel(3, 0), palette[1]);
		assert_eq!(image.pixel(23, 2), palette[7]);
		assert_eq!(image.pixel(0, 3), palette[8]);
		assert_eq!(image.pixel(23, 5), palette[15]);

		let unscaled = compositePaletteSwatch(&palette, 1).unwrap();
		assert_eq!((unscaled.width, unscaled.height), (8, 2));
		assert!(compositePaletteSwatch(&palette, 0).is_err());
	}

	#[test]
	fn swatch_scale_is_capped() {
		let palette = rainbow();
		let largest = compositePaletteSwatch(&palette, MAX_SWATCH_SCALE).unwrap();
		assert_eq!((largest.width, largest.height), (8 * MAX_SWATCH_SCALE, 2 * MAX_SWATCH_SCALE));
		assert_eq!(largest.data.len(), largest.width * largest.height * 3);
		for scale in [MAX_SWATCH_SCALE + 1, 1 << 31, (1 << 62) + 1, usize::MAX] {
			assert_eq!(
				compositePaletteSwatch(&palette, scale),
				Err(DecodeError::IndexOutOfRange { kind: IndexKind::Scale, index: scale, len: MAX_SWATCH_SCALE + 1 }),
				"{scale}"
			);
		}
	}

	#[test]
	fn map_cells_pick_tiles() {
		let (solid1, solid2) = ("1".repeat(64), "2".repeat(64));
		let tileSet = tileSet(&[(1, solid1.as_str()), (2, solid2.as_str())]);
		// row 0 starts with tile 1, row 135 ends with tile 2; everything else is tile 0
		let mut lines = vec!["-- <MAP>".to_owned()];
		for row in 0..MAP_HEIGHT {
			let mut cells = "00".repeat(MAP_WIDTH);
			if row == 0 {
				cells.replace_range(..2, "10");
			}
			if row == MAP_HEIGHT - 1 {
				cells.replace_range(cells.len() - 2.., "20");
			}
			lines.push(format!("-- {row:03}:{cells}"));
		}
		lines.push("-- </MAP>".into());
		let (tileMap, palette) = (decodeTileMap(&lines).unwrap(), rainbow());

		let image = compositeMap(&tileSet, &tileMap, &palette).unwrap();
		assert_eq!((image.width, image.height), (IMAGE_WIDTH, IMAGE_HEIGHT));
		assert_eq!(image.pixel(0, 0), palette[1]);
		assert_eq!(image.pixel(7, 7), palette[1]);
		assert_eq!(image.pixel(8, 0), palette[0]);
		assert_eq!(image.pixel(IMAGE_WIDTH - 1, IMAGE_HEIGHT - 1), palette[2]);
		assert_eq!(image.pixel(IMAGE_WIDTH - 9, IMAGE_HEIGHT - 1), palette[0]);
	}

	#[test]
	fn undersized_map_fails() {
		let lines = ["-- <MAP>", "-- 000:00", "-- </MAP>"];
		let tileMap = decodeTileMap(&lines).unwrap();
		assert_eq!(
			compositeMap(&tileSet(&[]), &tileMap, &rainbow()),
			Err(DecodeError::IndexOutOfRange { kind: IndexKind::MapColumn, index: 1, len: 1 })
		);
		assert!(matches!(
			compositeMap(&tileSet(&[]), &TileMap::default(), &rainbow()),
			Err(DecodeError::IndexOutOfRange { kind: IndexKind::MapRow, index: 0, len: 0 })
		));
	}
}
