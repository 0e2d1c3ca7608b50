use thiserror::Error;

use crate::content::ContentSpecId;
use crate::declaration::ElementId;

/// Errors in the use of the grammar API.
///
/// These never describe the document being validated; those problems are
/// reported as [`Diagnostic`](crate::Diagnostic)s.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown content spec node {0:?}")]
    UnknownContentSpec(ContentSpecId),
    #[error("content spec node {parent:?} refers forward to {child:?}")]
    ForwardContentSpec {
        parent: ContentSpecId,
        child: ContentSpecId,
    },
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
}

pub type Result<T> = std::result::Result<T, Error>;
