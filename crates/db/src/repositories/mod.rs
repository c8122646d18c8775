mod bibliography_repository;
mod chapter_repository;
mod chat_message_repository;
mod chat_session_repository;
mod enrollment_repository;
mod module_repository;
mod student_repository;

pub use bibliography_repository::BibliographyRepository;
pub use chapter_repository::ChapterRepository;
pub use chat_message_repository::ChatMessageRepository;
pub use chat_session_repository::ChatSessionRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use module_repository::ModuleRepository;
pub use student_repository::StudentRepository;
