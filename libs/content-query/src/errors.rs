/// Errors raised while assembling a content query.
///
/// Rendering never fails; these only surface when a query is validated or
/// bound to a collection path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No Path provided")]
    EmptyPath,

    #[error("invalid content path: {0}")]
    InvalidPath(String),
}
