mod applications;
mod dashboard;
mod feedback;
mod internships;
mod posts;

pub use applications::ReviewApplications;
pub use dashboard::AdminDashboard;
pub use feedback::FeedbackList;
pub use internships::{ManageInternships, NewInternship};
pub use posts::ReviewPosts;
