pub mod internship_card;
pub mod navbar;
pub mod status;
