use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Prefix of every environment variable read by [`parse`].
pub const ENV_PREFIX: &str = "MENTOR";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

const CONFIG_FILE_KEY: &str = "config_file";
const CONFIG_ARG_ID: &str = "config";
const PROBED_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("config file not found: {0}")]
	NotFound(PathBuf),
	#[error("failed to parse config file {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},
	#[error("failed to serialize default config: {0}")]
	Defaults(#[source] serde_yaml::Error),
	#[error("invalid config: {0}")]
	Deserialize(#[source] serde_yaml::Error),
	#[error("invalid command line: {0}")]
	Cli(#[from] clap::Error),
}

/// A parsed configuration and the file it was loaded from, if any.
#[derive(Debug, Clone)]
pub struct Parsed<C> {
	pub config: C,
	pub file: Option<PathBuf>,
}

/// Builds `C` from its defaults, an optional config file and the process
/// environment, each layer overriding the previous one.
///
/// The file is taken from `--config` (when `enable_cli` is set), then from
/// `MENTOR_CONFIG_FILE`, then from the default `config_file` of `C`. A file
/// given without an extension is probed as `.yaml`, `.yml` and `.json`. Only
/// a missing default file is tolerated.
pub fn parse<C: Serialize + DeserializeOwned + Default>(enable_cli: bool) -> Result<Parsed<C>, ConfigError> {
	let mut merged = serde_yaml::to_value(C::default()).map_err(ConfigError::Defaults)?;
	let env = env_layer(std::env::vars());

	let cli_file = if enable_cli {
		let matches = clap::Command::new("")
			.arg(
				clap::Arg::new(CONFIG_ARG_ID)
					.long(CONFIG_ARG_ID)
					.short('c')
					.help("The configuration file to use")
					.value_name("FILE")
					.action(clap::ArgAction::Set),
			)
			.try_get_matches()?;

		matches.get_one::<String>(CONFIG_ARG_ID).cloned()
	} else {
		None
	};

	let explicit = cli_file.or_else(|| string_key(&env, CONFIG_FILE_KEY));
	let is_explicit = explicit.is_some();

	let mut file = None;
	if let Some(path) = explicit.or_else(|| string_key(&merged, CONFIG_FILE_KEY)) {
		match resolve_file(Path::new(&path)) {
			Some(found) => {
				let contents = std::fs::read_to_string(&found).map_err(|source| ConfigError::Io {
					path: found.clone(),
					source,
				})?;

				let layer = if contents.trim().is_empty() {
					Value::Mapping(Mapping::new())
				} else {
					serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
						path: found.clone(),
						source,
					})?
				};

				merge(&mut merged, layer);
				file = Some(found);
			}
			None if is_explicit => return Err(ConfigError::NotFound(PathBuf::from(path))),
			None => tracing::debug!(path = %path, "default config file not found, skipping"),
		}
	}

	merge(&mut merged, env);

	Ok(Parsed {
		config: serde_yaml::from_value(merged).map_err(ConfigError::Deserialize)?,
		file,
	})
}

fn resolve_file(path: &Path) -> Option<PathBuf> {
	if path.extension().is_some() {
		return path.is_file().then(|| path.to_path_buf());
	}

	PROBED_EXTENSIONS
		.iter()
		.map(|ext| path.with_extension(ext))
		.find(|candidate| candidate.is_file())
}

fn string_key(value: &Value, key: &str) -> Option<String> {
	value.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Turns `MENTOR_LOGGING__LEVEL=debug` into `{ logging: { level: debug } }`.
///
/// Values are read as YAML scalars so numbers and booleans keep their type.
pub(crate) fn env_layer(vars: impl IntoIterator<Item = (String, String)>) -> Value {
	let prefix = format!("{ENV_PREFIX}_");
	let mut root = Value::Mapping(Mapping::new());

	for (key, raw) in vars {
		let Some(key) = key.strip_prefix(&prefix) else {
			continue;
		};

		let path = key
			.split(ENV_SEPARATOR)
			.map(|segment| segment.to_lowercase())
			.collect::<Vec<_>>();

		if path.iter().any(String::is_empty) {
			continue;
		}

		let value = match serde_yaml::from_str::<Value>(&raw) {
			Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Null)) => value,
			_ => Value::String(raw),
		};

		let nested = path
			.into_iter()
			.rev()
			.fold(value, |inner, segment| Value::Mapping(Mapping::from_iter([(Value::String(segment), inner)])));

		merge(&mut root, nested);
	}

	root
}

/// Deep merges `incoming` into `base`. Mappings merge key by key, anything
/// else is replaced.
pub(crate) fn merge(base: &mut Value, incoming: Value) {
	match (base, incoming) {
		(Value::Mapping(base), Value::Mapping(incoming)) => {
			for (key, value) in incoming {
				match base.get_mut(&key) {
					Some(existing) => merge(existing, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(base, incoming) => *base = incoming,
	}
}
