use serde::{Deserialize, Serialize};

/// A knowledge-base citation attached to an assistant message.
///
/// The retrieval layer annotates replies with the articles it drew from.
/// Only the title is guaranteed; URL, excerpt, and relevance score depend on
/// the kind of document cited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeSource {
    /// Title of the cited article.
    pub title: String,

    /// Link to the article, when it is customer-visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// The passage the answer was grounded on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Retrieval relevance score in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl KnowledgeSource {
    /// Creates a new source with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            excerpt: None,
            score: None,
        }
    }

    /// Sets the article URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the grounding excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Sets the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}
