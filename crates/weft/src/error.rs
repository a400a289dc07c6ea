//! Error types for Weft operations.

use thiserror::Error;

use weft_core::identifier::Id;

/// The main error type for Weft operations.
///
/// Degenerate numeric inputs (zero data maxima, zero marker dimensions) are
/// not errors; they are recovered locally with defined fallbacks. The
/// variants here are precondition violations that must stop processing
/// before a simulation runs on undefined data.
#[derive(Debug, Error)]
pub enum WeftError {
    /// A link references a node id that is not part of the network.
    #[error("Link '{link}' references unknown node '{endpoint}'")]
    UnresolvedLink { link: Id, endpoint: Id },

    /// A link id appears more than once in the network.
    #[error("Duplicate link id '{0}'")]
    DuplicateLink(Id),

    /// A node id appears more than once in the network.
    #[error("Duplicate node id '{0}'")]
    DuplicateNode(Id),

    /// An interaction referenced a node id that is not part of the network.
    #[error("Unknown node '{0}'")]
    UnknownNode(Id),
}
