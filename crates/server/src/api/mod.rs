#[cfg(feature = "server")]
pub(crate) mod auth;

mod session;
pub use session::*;

mod account;
pub use account::*;

mod internship;
pub use internship::*;

mod application;
pub use application::*;

mod bookmark;
pub use bookmark::*;

mod post;
pub use post::*;

mod notification;
pub use notification::*;

mod dashboard;
pub use dashboard::*;

mod feedback;
pub use feedback::*;
