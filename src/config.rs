use {
	serde::Deserialize,
	std::{fs, io, path::PathBuf},
	thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{path:?}: {source}")]
	Io { path: PathBuf, source: io::Error },
	#[error("{path:?}: {source}")]
	Toml { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub swapTransparent: bool,
	pub paletteScale: usize,
	pub outputDir: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		Self { swapTransparent: true, paletteScale: 1, outputDir: PathBuf::new() }
	}
}

impl Config {
	pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
		let text = match fs::read_to_string(&path) {
			Ok(text) => text,
			Err(source) => return Err(ConfigError::Io { path, source }),
		};
		toml::from_str(&text).map_err(|source| ConfigError::Toml { path, source })
	}
}
