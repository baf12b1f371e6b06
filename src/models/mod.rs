pub mod issue;
pub mod user;
pub mod search;
pub mod worklog;

pub use issue::*;
pub use user::*;
pub use search::*;
pub use worklog::*;
