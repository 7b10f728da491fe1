use crate::config::Config;

use super::Error;

/// Words that may not appear in a post title.
///
/// This runs after the request body has passed its field validation, when the
/// post is about to be written.
#[derive(Debug, Clone, Default)]
pub struct TitlePolicy {
	forbidden: Vec<String>,
	message: String,
}

impl TitlePolicy {
	pub fn new(forbidden: impl IntoIterator<Item = impl Into<String>>, message: impl Into<String>) -> Self {
		Self {
			forbidden: forbidden
				.into_iter()
				.map(Into::into)
				.filter(|word: &String| !word.is_empty())
				.collect(),
			message: message.into(),
		}
	}

	pub fn from_config(config: &Config) -> Self {
		Self::new(
			config.forbidden_title_words.iter().cloned(),
			config.forbidden_title_message.clone(),
		)
	}

	pub fn check(&self, title: &str) -> Result<(), Error> {
		match self.forbidden.iter().find(|word| title.contains(word.as_str())) {
			Some(word) => Err(Error::ForbiddenTitle {
				word: word.clone(),
				message: self.message.clone(),
			}),
			None => Ok(()),
		}
	}
}
