mod dashboard;
mod form;
mod posts;

pub use dashboard::AlumniDashboard;
pub use form::{EditPost, NewPost};
pub use posts::MyPosts;
