use campus_core::{BibliographyItem, BibliographyKind, Chapter, Module, Student};
use uuid::Uuid;

use super::{datetime_to_timestamp, timestamp_to_datetime};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRow {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl StudentRow {
    pub fn into_domain(self) -> Student {
        Student {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            display_name: self.display_name,
            email: self.email,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.to_string(),
            display_name: student.display_name.clone(),
            email: student.email.clone(),
            created_at: datetime_to_timestamp(student.created_at),
            updated_at: datetime_to_timestamp(student.updated_at),
            deleted_at: student.deleted_at.map(datetime_to_timestamp),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ModuleRow {
    pub id: String,
    pub title: String,
    pub published: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl ModuleRow {
    pub fn into_domain(self) -> Module {
        Module {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            title: self.title,
            published: self.published,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&Module> for ModuleRow {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id.to_string(),
            title: module.title.clone(),
            published: module.published,
            created_at: datetime_to_timestamp(module.created_at),
            updated_at: datetime_to_timestamp(module.updated_at),
            deleted_at: module.deleted_at.map(datetime_to_timestamp),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChapterRow {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl ChapterRow {
    pub fn into_domain(self) -> Chapter {
        Chapter {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            module_id: Uuid::parse_str(&self.module_id).unwrap_or_default(),
            title: self.title,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&Chapter> for ChapterRow {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id.to_string(),
            module_id: chapter.module_id.to_string(),
            title: chapter.title.clone(),
            created_at: datetime_to_timestamp(chapter.created_at),
            updated_at: datetime_to_timestamp(chapter.updated_at),
            deleted_at: chapter.deleted_at.map(datetime_to_timestamp),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BibliographyItemRow {
    pub id: String,
    pub chapter_id: String,
    pub title: String,
    pub content: String,
    pub kind: String,
    pub sequence: i64,
    pub anchor_question: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl BibliographyItemRow {
    pub fn into_domain(self) -> BibliographyItem {
        BibliographyItem {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            chapter_id: Uuid::parse_str(&self.chapter_id).unwrap_or_default(),
            title: self.title,
            content: self.content,
            kind: BibliographyKind::parse(&self.kind).unwrap_or_default(),
            sequence: self.sequence,
            anchor_question: self.anchor_question,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&BibliographyItem> for BibliographyItemRow {
    fn from(item: &BibliographyItem) -> Self {
        Self {
            id: item.id.to_string(),
            chapter_id: item.chapter_id.to_string(),
            title: item.title.clone(),
            content: item.content.clone(),
            kind: item.kind.as_str().to_string(),
            sequence: item.sequence,
            anchor_question: item.anchor_question.clone(),
            created_at: datetime_to_timestamp(item.created_at),
            updated_at: datetime_to_timestamp(item.updated_at),
            deleted_at: item.deleted_at.map(datetime_to_timestamp),
        }
    }
}
