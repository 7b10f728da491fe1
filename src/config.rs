use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FORBIDDEN_TITLE_MESSAGE: &str = "title contains a forbidden word";

/// An error that can occur while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} must be a valid {kind}, got {value:?}")]
	Invalid {
		name: &'static str,
		kind: &'static str,
		value: String,
	},
}

/// Runtime configuration, read from the environment (and `.env`) on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub host: IpAddr,
	pub port: u16,
	/// When absent, posts are kept in memory for the lifetime of the process.
	pub database_url: Option<String>,
	/// Export traces and metrics over OTLP.
	pub otlp: bool,
	pub forbidden_title_words: Vec<String>,
	pub forbidden_title_message: String,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let host = match lookup("HOST") {
			Some(value) => value.parse().map_err(|_| Error::Invalid {
				name: "HOST",
				kind: "ip address",
				value,
			})?,
			None => IpAddr::V4(Ipv4Addr::LOCALHOST),
		};

		let port = match lookup("PORT") {
			Some(value) => value.parse().map_err(|_| Error::Invalid {
				name: "PORT",
				kind: "port number",
				value,
			})?,
			None => DEFAULT_PORT,
		};

		let forbidden_title_words = lookup("POST_FORBIDDEN_TITLE_WORDS")
			.map(|words| {
				words
					.split(',')
					.map(str::trim)
					.filter(|word| !word.is_empty())
					.map(str::to_owned)
					.collect()
			})
			.unwrap_or_default();

		Ok(Self {
			host,
			port,
			database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
			otlp: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").is_some_and(|url| !url.is_empty()),
			forbidden_title_words,
			forbidden_title_message: lookup("POST_FORBIDDEN_TITLE_MESSAGE")
				.unwrap_or_else(|| DEFAULT_FORBIDDEN_TITLE_MESSAGE.into()),
		})
	}
}
