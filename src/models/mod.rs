pub mod list;
pub mod recipe;
pub mod session;
pub mod user;

pub use list::*;
pub use recipe::*;
pub use session::*;
pub use user::*;
