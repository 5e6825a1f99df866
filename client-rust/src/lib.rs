mod article_url;
mod client;
mod client_utils;
mod errors;
mod normalize;
mod opentelemetry;
mod quiz_backend;
pub mod quiz_client_test;
mod types;

pub use article_url::{is_valid_article_url, ARTICLE_PATH_PREFIX, WIKIPEDIA_HOST};
pub use client::{QuizClient, QuizClientOptions, DEFAULT_BASE_URL};
pub use errors::*;
pub use normalize::normalize;
pub use quiz_backend::{QuizBackend, QuizOperation};
pub use types::*;
