mod applications;
mod bookmarks;
mod dashboard;
mod detail;
mod internships;

pub use applications::MyApplications;
pub use bookmarks::Bookmarks;
pub use dashboard::StudentDashboard;
pub use detail::InternshipDetail;
pub use internships::InternshipList;
