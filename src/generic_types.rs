use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\w+").expect("word regex is valid");
}

/// An article as delivered by the feed layer. Only `content` feeds the
/// classifier; the rest exists so feature extraction has a typed source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub primary_category: Option<String>,
    #[serde(default)]
    pub image_count: usize,
}

/// Typed per-article feature record. Replaces the string-keyed `Any`
/// dictionary the UI layer used to carry; consumers outside this crate
/// agree on this schema.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleFeatures {
    pub title_length: usize,
    pub content_size: usize,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub image_count: usize,
    pub primary_category: Option<String>,
    pub average_title_word_length: usize,
    /// Title with any trailing `| Publication` suffix removed.
    pub pipe_title: String,
}

impl ArticleFeatures {
    pub fn from_article(article: &Article) -> Self {
        let title_words: Vec<&str> = article.title.split_whitespace().collect();
        let average_title_word_length = if title_words.is_empty() {
            0
        } else {
            article.title.chars().count() / title_words.len()
        };

        let pipe_title = article
            .title
            .split('|')
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        ArticleFeatures {
            title_length: article.title.chars().count(),
            content_size: article.content.chars().count(),
            categories: article.categories.clone(),
            tags: article.tags.clone(),
            image_count: article.image_count,
            primary_category: article.primary_category.clone(),
            average_title_word_length,
            pipe_title,
        }
    }
}

/// Tokenize article text into word observations. Duplicates are kept on
/// purpose: occurrence count is the feature weight.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}
