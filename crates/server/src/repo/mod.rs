pub mod account;
pub mod application;
pub mod bookmark;
pub mod feedback;
pub mod internship;
pub mod notification;
pub mod post;
pub mod profile;
pub mod stats;
