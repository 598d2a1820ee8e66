pub mod failure;
pub mod indent;

pub use failure::{Failure, MismatchFailure, SameFailure};
pub use indent::Indent;
