//! Concrete page definitions, one module per registered page.

pub mod ap_type;
pub mod attach_documents;
pub mod check_answers;
pub mod oral_hearing;
pub mod placement_date;
pub mod release_date;
pub mod release_type;
pub mod sentence_type;
pub mod situation;

pub use ap_type::ApTypePage;
pub use attach_documents::AttachDocumentsPage;
pub use check_answers::CheckAnswersPage;
pub use oral_hearing::OralHearingPage;
pub use placement_date::PlacementDatePage;
pub use release_date::ReleaseDatePage;
pub use release_type::ReleaseTypePage;
pub use sentence_type::SentenceTypePage;
pub use situation::SituationPage;
