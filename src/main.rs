#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	anyhow::Context,
	clap::{value_parser, Parser, Subcommand},
	const_format::formatcp,
	log::info,
	mapify::{
		cart::{decodePaletteWith, decodeTileMap, decodeTileSet, Cart},
		compositor::{compositeMap, compositePaletteSwatch, compositeTile, MAX_SWATCH_SCALE},
		config::Config,
		readLines,
		transform::swapTransparentToBlack,
		PaletteTransform, IMAGE_HEIGHT, IMAGE_WIDTH, NTILES,
	},
	std::{
		fs::File,
		io::{self, BufWriter, Write},
		path::{Path, PathBuf},
	},
};

const ABOUT: &str = formatcp!(
	"Render the map ({}x{} pixels), a single tile or the palette of a TIC-80 .lua cart as a PNG",
	IMAGE_WIDTH,
	IMAGE_HEIGHT
);
const STDIN_PATH: &str = "-";

#[derive(Parser)]
#[clap(version, about = ABOUT)]
struct Args {
	/// The cart, or - to read it from stdin
	#[clap(value_parser)]
	cartfile: PathBuf,

	/// TOML file with render settings
	#[clap(long, value_parser)]
	config: Option<PathBuf>,

	/// Keep palette slot 6 as it is instead of drawing it with slot 0's color
	#[clap(long)]
	keepTransparent: bool,

	#[clap(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
	/// Render the whole map into map.png (the default)
	Map {
		#[clap(short, long, value_parser)]
		output: Option<PathBuf>,
	},
	/// Render one tile into tile_<ID>.png
	Tile {
		#[clap(value_parser = value_parser!(u16).range(0..(NTILES as i64)))]
		id: u16,

		#[clap(short, long, value_parser)]
		output: Option<PathBuf>,
	},
	/// Render the palette as two rows of eight colors into palette.png
	Palette {
		/// Side of each color block in pixels
		#[clap(long, value_parser = value_parser!(u32).range(1..=(MAX_SWATCH_SCALE as i64)))]
		scale: Option<u32>,

		#[clap(short, long, value_parser)]
		output: Option<PathBuf>,
	},
	/// Print what the cart contains, as TOML
	Info,
}

fn main() -> anyhow::Result<()> {
	env_logger::init();
	let Args { cartfile, config, keepTransparent, command } = Args::parse();
	let config = match config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	let cart = &if cartfile == Path::new(STDIN_PATH) {
		readLines(io::stdin().lock()).context("stdin")?
	} else {
		File::open(&cartfile).and_then(readLines).with_context(|| format!("{cartfile:?}"))?
	};
	let transform = if config.swapTransparent && !keepTransparent {
		Some(&swapTransparentToBlack as &dyn PaletteTransform)
	} else {
		None
	};

	let (image, output) = match command.unwrap_or(Command::Map { output: None }) {
		Command::Map { output } => {
			let (tileSet, tileMap) = (decodeTileSet(cart)?, decodeTileMap(cart)?);
			let palette = decodePaletteWith(cart, transform)?;
			(compositeMap(&tileSet, &tileMap, &palette)?, output.unwrap_or_else(|| config.outputDir.join("map.png")))
		}
		Command::Tile { id, output } => {
			let (tileSet, palette) = (decodeTileSet(cart)?, decodePaletteWith(cart, transform)?);
			(
				compositeTile(&tileSet, &palette, id.into())?,
				output.unwrap_or_else(|| config.outputDir.join(format!("tile_{id}.png"))),
			)
		}
		Command::Palette { scale, output } => {
			let scale = scale.map_or(config.paletteScale, |scale| scale as _);
			(
				compositePaletteSwatch(&decodePaletteWith(cart, transform)?, scale)?,
				output.unwrap_or_else(|| config.outputDir.join("palette.png")),
			)
		}
		Command::Info => {
			let summary = Cart::decode(cart, transform)?.summary();
			let stdout = &mut io::stdout().lock();
			stdout.write_all(toml::to_string(&summary)?.as_bytes())?;
			return Ok(stdout.flush()?);
		}
	};

	let w = BufWriter::new(File::create(&output).with_context(|| format!("{output:?}"))?);
	image.writePNG(w).with_context(|| format!("{output:?}"))?;
	info!("wrote {output:?} ({}x{})", image.width, image.height);
	Ok(())
}
