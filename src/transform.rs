use crate::cart::Palette;

pub trait PaletteTransform {
	fn apply(&self, palette: Palette) -> Palette;
}

impl<F: Fn(Palette) -> Palette> PaletteTransform for F {
	fn apply(&self, palette: Palette) -> Palette {
		self(palette)
	}
}

pub fn swapTransparentToBlack(mut palette: Palette) -> Palette {
	palette[Palette::TRANSPARENT] = palette[Palette::BLACK];
	palette
}
