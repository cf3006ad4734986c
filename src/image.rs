use {
	crate::cart::Rgb,
	png::{BitDepth, ColorType, EncodingError},
	std::io::Write,
};

pub const RGB_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
	pub width: usize,
	pub height: usize,
	pub data: Vec<u8>,
}

impl Image {
	pub fn fromWidthHeight(width: usize, height: usize) -> Self {
		Self { width, height, data: vec![0; width * height * RGB_SIZE] }
	}

	// PNG dimensions are 32-bit
	pub fn tryFromWidthHeight(width: usize, height: usize) -> Option<Self> {
		u32::try_from(width).ok()?;
		u32::try_from(height).ok()?;
		let len = width.checked_mul(height)?.checked_mul(RGB_SIZE)?;
		Some(Self { width, height, data: vec![0; len] })
	}

	#[inline(always)]
	fn offset(&self, x: usize, y: usize) -> usize {
		debug_assert!(x < self.width && y < self.height);
		(y * self.width + x) * RGB_SIZE
	}

	#[inline]
	pub fn putPixel(&mut self, x: usize, y: usize, Rgb(color): Rgb) {
		let offset = self.offset(x, y);
		self.data[offset..offset + RGB_SIZE].copy_from_slice(&color);
	}

	pub fn pixel(&self, x: usize, y: usize) -> Rgb {
		let offset = self.offset(x, y);
		let mut color = [0; RGB_SIZE];
		color.copy_from_slice(&self.data[offset..offset + RGB_SIZE]);
		Rgb(color)
	}

	pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
		self.data.chunks(self.width * RGB_SIZE)
	}

	pub fn writePNG<W: Write>(&self, w: W) -> Result<(), EncodingError> {
		let mut png = png::Encoder::new(w, self.width as _, self.height as _);
		png.set_color(ColorType::Rgb);
		png.set_depth(BitDepth::Eight);
		png.write_header()?.write_image_data(&self.data)
	}
}
