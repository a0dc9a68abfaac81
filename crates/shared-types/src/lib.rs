pub mod error;
pub mod config;
pub mod common;

// Auth and navigation
pub mod role;
pub mod profile;
pub mod session;
pub mod access;

// Campus domain
pub mod internship;
pub mod application;
pub mod bookmark;
pub mod post;
pub mod notification;
pub mod feedback;
pub mod dashboard;

pub use error::*;
pub use config::*;
pub use common::ParseEnumError;

pub use role::*;
pub use profile::*;
// session and access are used through their module paths
// (shared_types::session::SessionState, shared_types::access::decide).

pub use internship::*;
pub use application::*;
pub use bookmark::*;
pub use post::*;
pub use notification::*;
pub use feedback::*;
pub use dashboard::*;
