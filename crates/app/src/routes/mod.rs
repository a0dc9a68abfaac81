pub mod admin;
pub mod alumni;
pub mod feedback;
pub mod home;
pub mod login;
pub mod not_found;
pub mod notifications;
pub mod profile;
pub mod signup;
pub mod student;
pub mod unauthorized;

use dioxus::prelude::*;
use shared_types::Role;
use uuid::Uuid;

use crate::components::navbar::{AppNavbar, UnreadRefresh};
use crate::guard::{AdminArea, AlumniArea, SignedInArea, StudentArea};

use admin::{
    AdminDashboard, FeedbackList, ManageInternships, NewInternship, ReviewApplications, ReviewPosts,
};
use alumni::{AlumniDashboard, EditPost, MyPosts, NewPost};
use feedback::GiveFeedback;
use home::Home;
use login::Login;
use not_found::NotFound;
use notifications::Notifications;
use profile::ProfileSettings;
use signup::Signup;
use student::{Bookmarks, InternshipDetail, InternshipList, MyApplications, StudentDashboard};
use unauthorized::Unauthorized;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/auth/login")]
        Login {},
        #[route("/auth/signup")]
        Signup {},
        #[route("/unauthorized")]
        Unauthorized {},

        #[layout(SignedInArea)]
            #[route("/notifications")]
            Notifications {},
            #[route("/feedback")]
            GiveFeedback {},
            #[route("/profile")]
            ProfileSettings {},
        #[end_layout]

        #[nest("/student")]
        #[layout(StudentArea)]
            #[route("/dashboard")]
            StudentDashboard {},
            #[route("/internships")]
            InternshipList {},
            #[route("/internships/:id")]
            InternshipDetail { id: Uuid },
            #[route("/applications")]
            MyApplications {},
            #[route("/bookmarks")]
            Bookmarks {},
        #[end_layout]
        #[end_nest]

        #[nest("/alumni")]
        #[layout(AlumniArea)]
            #[route("/dashboard")]
            AlumniDashboard {},
            #[route("/posts")]
            MyPosts {},
            #[route("/posts/new")]
            NewPost {},
            #[route("/posts/:id/edit")]
            EditPost { id: Uuid },
        #[end_layout]
        #[end_nest]

        #[nest("/admin")]
        #[layout(AdminArea)]
            #[route("/dashboard")]
            AdminDashboard {},
            #[route("/internships")]
            ManageInternships {},
            #[route("/internships/new")]
            NewInternship {},
            #[route("/applications")]
            ReviewApplications {},
            #[route("/posts")]
            ReviewPosts {},
            #[route("/feedback")]
            FeedbackList {},
        #[end_layout]
        #[end_nest]
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Typed route for a role's dashboard; home when there is no profile yet.
pub fn dashboard_route(role: Option<Role>) -> Route {
    match role {
        Some(Role::Student) => Route::StudentDashboard {},
        Some(Role::Alumni) => Route::AlumniDashboard {},
        Some(Role::Admin) => Route::AdminDashboard {},
        None => Route::Home {},
    }
}

/// Navbar on top, page below. Provides the unread-count refresh signal the
/// notifications page bumps after marking items read.
#[component]
fn AppLayout() -> Element {
    use_context_provider(|| UnreadRefresh(Signal::new(0)));

    rsx! {
        div { class: "app-shell",
            AppNavbar {}
            main { class: "page-content",
                Outlet::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{dashboard_path_for, ALL_ROLES};

    #[test]
    fn dashboard_routes_match_role_paths() {
        for role in ALL_ROLES {
            assert_eq!(
                dashboard_route(Some(*role)).to_string(),
                dashboard_path_for(Some(*role))
            );
        }
        assert_eq!(dashboard_route(None).to_string(), "/");
    }

    #[test]
    fn id_routes_parse() {
        let id = Uuid::from_u128(7);
        let path = Route::InternshipDetail { id }.to_string();
        assert_eq!(path, format!("/student/internships/{id}"));
        assert_eq!(path.parse::<Route>().ok(), Some(Route::InternshipDetail { id }));
        assert_eq!(
            Route::EditPost { id }.to_string(),
            format!("/alumni/posts/{id}/edit")
        );
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        let route = "/student/nope/here".parse::<Route>().ok();
        assert!(matches!(route, Some(Route::NotFound { .. })));
    }
}
