use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{
	error::{self, AppError, ErrorResponse},
	extract::Json,
};

pub mod tag {
	pub const POST: &str = "Post";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Blog API")
		.summary("A small blog post service")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Post management".into()),
			..Default::default()
		})
		.default_response_with::<Json<ErrorResponse>, _>(|res| {
			res.example(ErrorResponse::from(AppError::field(
				"title",
				"title must not be blank",
			)))
			.description(error::INVALID_REQUEST)
		})
}
