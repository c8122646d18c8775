use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Module {
    pub id: Uuid,
    pub title: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Module {
    pub fn new(title: impl Into<String>, published: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            published,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Chapter {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Chapter {
    pub fn new(module_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            module_id,
            title: title.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BibliographyKind {
    #[default]
    Reading,
    Quiz,
}

impl BibliographyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Quiz => "quiz",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reading" => Some(Self::Reading),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

/// One entry in a chapter's bibliography. `sequence` orders live siblings
/// within the chapter and must be unique among them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BibliographyItem {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    pub content: String,
    pub kind: BibliographyKind,
    pub sequence: i64,
    /// Question the advisor opens the anchored chat with, when present.
    pub anchor_question: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BibliographyItem {
    pub fn new(
        chapter_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        kind: BibliographyKind,
        sequence: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            chapter_id,
            title: title.into(),
            content: content.into(),
            kind,
            sequence,
            anchor_question: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.anchor_question = Some(question.into());
        self
    }

    pub fn declares_question(&self) -> bool {
        self.anchor_question
            .as_deref()
            .is_some_and(|q| !q.trim().is_empty())
    }
}

/// A requested move inside one chapter's bibliography ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SequenceMove {
    pub item_id: Uuid,
    pub new_sequence: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_question() {
        let item = BibliographyItem::new(
            Uuid::new_v4(),
            "Chapter notes",
            "...",
            BibliographyKind::Reading,
            1,
        );
        assert!(!item.declares_question());

        let with_question = item.clone().with_question("What is the main theme?");
        assert!(with_question.declares_question());

        let blank = item.with_question("   ");
        assert!(!blank.declares_question());
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(BibliographyKind::parse("quiz"), Some(BibliographyKind::Quiz));
        assert_eq!(BibliographyKind::Reading.as_str(), "reading");
        assert_eq!(BibliographyKind::parse("video"), None);
    }
}
