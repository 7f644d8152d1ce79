use serde::{Deserialize, Serialize};

use crate::domain::types::{QuestionId, QuestionTitle, ResourceLink, Tag};

/// External resources attached to a question. Each link is independently
/// optional and absent links are left out of the JSON representation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yt_link: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1_link: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2_link: Option<ResourceLink>,
}

/// A single catalog prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub title: QuestionTitle,
    pub url: QuestionLinks,
    /// Ordered as imported.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Information required to create a new [`Question`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: QuestionTitle,
    pub url: QuestionLinks,
    pub tags: Vec<Tag>,
}
