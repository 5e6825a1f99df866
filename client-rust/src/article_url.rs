use reqwest::Url;

/// Host of English Wikipedia.
pub const WIKIPEDIA_HOST: &str = "en.wikipedia.org";
/// Path prefix of the article namespace.
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// Check whether `input` references an English Wikipedia article.
/// This is purely syntactic: the article is not required to exist.
#[must_use]
pub fn is_valid_article_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| {
        url.host_str() == Some(WIKIPEDIA_HOST) && url.path().starts_with(ARTICLE_PATH_PREFIX)
    })
}
