use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::{model::Post, store::Page};

/// The largest page that can be requested at once.
pub const MAX_SIZE: i64 = 2000;

fn not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::new("blank"));
	}

	Ok(())
}

/// Reads a missing or `null` string as an empty one, so it is rejected
/// by [`not_blank`] instead of the deserializer.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PostCreate {
	/// The title of the post.
	#[serde(default, deserialize_with = "null_as_empty")]
	#[schemars(with = "Option<String>")]
	#[validate(custom(function = "not_blank", message = "title must not be blank"))]
	pub title: String,
	/// The content of the post.
	#[serde(default, deserialize_with = "null_as_empty")]
	#[schemars(with = "Option<String>")]
	#[validate(custom(function = "not_blank", message = "content must not be blank"))]
	pub content: String,
}

/// A partial update, where missing fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
pub struct PostEdit {
	/// The new title of the post.
	#[serde(default)]
	pub title: Option<String>,
	/// The new content of the post.
	#[serde(default)]
	pub content: Option<String>,
}

/// These can be removed when [`serde`] supports
/// literal defaults: <https://github.com/serde-rs/serde/issues/368>
#[inline]
fn one() -> i64 {
	1
}

#[inline]
fn five() -> i64 {
	5
}

/// Out-of-range values are clamped rather than rejected.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PostSearch {
	/// The page number to return (1-indexed).
	#[serde(default = "one")]
	pub page: i64,
	/// The number of posts to return per page, at most 2000.
	#[serde(default = "five")]
	pub size: i64,
}

impl Default for PostSearch {
	fn default() -> Self {
		Self {
			page: one(),
			size: five(),
		}
	}
}

impl PostSearch {
	pub fn limit(&self) -> i64 {
		self.size.clamp(0, MAX_SIZE)
	}

	pub fn offset(&self) -> i64 {
		(self.page.max(1) - 1).saturating_mul(self.limit())
	}

	pub fn page(&self) -> Page {
		Page {
			offset: self.offset(),
			limit: self.limit(),
		}
	}
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct PostIdInput {
	pub id: i64,
}

/// A single post, as returned to the client.
#[derive(Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PostResponse {
	/// The unique identifier of the post.
	pub id: i64,
	/// The title of the post.
	pub title: String,
	/// The content of the post.
	pub content: String,
}

impl From<Post> for PostResponse {
	fn from(post: Post) -> Self {
		Self {
			id: post.id,
			title: post.title,
			content: post.content,
		}
	}
}
