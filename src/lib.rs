#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

pub mod cart;
pub mod compositor;
pub mod config;
pub mod error;
pub mod hex;
pub mod image;
pub mod section;
pub mod transform;

pub use {
	cart::{Cart, Palette, Rgb, Tile, TileMap, TileSet},
	error::{DecodeError, IndexKind, RecordLocation},
	image::Image,
	transform::PaletteTransform,
};

use std::io::{self, Read};

pub const PALETTE_LEN: usize = 16;
pub const NTILES: usize = 256;
pub const TILE_SIZE: usize = 8;
pub const TILE_AREA: usize = TILE_SIZE * TILE_SIZE;

pub const IMAGE_WIDTH: usize = 1920;
pub const IMAGE_HEIGHT: usize = 1088;
pub const MAP_WIDTH: usize = IMAGE_WIDTH / TILE_SIZE;
pub const MAP_HEIGHT: usize = IMAGE_HEIGHT / TILE_SIZE;

pub fn readLines<R: Read>(mut r: R) -> io::Result<Vec<String>> {
	let text = &mut String::new();
	r.read_to_string(text)?;
	Ok(text.lines().map(|line| line.trim_end().to_owned()).collect())
}
