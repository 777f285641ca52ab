//! Detail/edit form controllers.
//!
//! A form holds a `*Draft` of one entity. It validates the draft locally
//! before any request and translates the server's problem codes back into
//! inline field errors or notices.

mod delete;
mod detail;
mod errors;
mod lookup;
mod notice;
mod order;
pub mod rules;

pub use delete::{DeleteDialog, DeleteOutcome, Reload};
pub use detail::{DetailController, LoadOutcome, SaveOutcome};
pub use errors::{FieldError, FieldErrors};
pub use lookup::Lookup;
pub use notice::{Notice, Severity, DETAIL_NOTICE_DURATION, LIST_NOTICE_DURATION};
pub use order::OrderDetail;

use std::fmt::Debug;

use validator::Validate;

use crate::domain::ProblemDetails;
use crate::resource::Resource;

/// What the screen does after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
    Stay,
    Navigate(&'static str),
}

/// A [`Resource`] that has an edit form.
pub trait Editable: Resource {
    type Draft: Validate + Default + Clone + Debug + Send + Sync;

    const AFTER_SAVE: AfterSave;

    fn draft_from(item: &Self::Item) -> Self::Draft;

    fn payload_from(draft: &Self::Draft) -> Self::Payload;

    /// Inline errors for a problem code this resource knows, `None` otherwise.
    fn problem_errors(problem: &ProblemDetails, draft: &Self::Draft) -> Option<FieldErrors>;
}

/// The part of a problem code after `{NAME}-`, e.g. `name-is-empty`.
pub(crate) fn problem_suffix<R: Resource>(problem: &ProblemDetails) -> Option<&str> {
    problem
        .kind
        .strip_prefix(R::NAME)
        .and_then(|rest| rest.strip_prefix('-'))
}

/// Which entity a form is bound to, as resolved from a route or dialog argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    New,
    Existing(String),
}

impl EntityRef {
    /// Absent, blank and `"new"` all mean a new entity.
    pub fn parse(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            None | Some("") | Some("new") => EntityRef::New,
            Some(id) => EntityRef::Existing(id.to_string()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            EntityRef::New => None,
            EntityRef::Existing(id) => Some(id),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, EntityRef::New)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_parse() {
        assert_eq!(EntityRef::parse(None), EntityRef::New);
        assert_eq!(EntityRef::parse(Some("  ")), EntityRef::New);
        assert_eq!(EntityRef::parse(Some("new")), EntityRef::New);
        assert_eq!(EntityRef::parse(Some("c1")), EntityRef::Existing("c1".to_string()));
    }
}
