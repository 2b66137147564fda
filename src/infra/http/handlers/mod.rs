pub mod case_studies;
pub mod insights;
pub mod notifications;
pub mod projects;
pub mod proposals;

pub use case_studies::*;
pub use insights::*;
pub use notifications::*;
pub use projects::*;
pub use proposals::*;
