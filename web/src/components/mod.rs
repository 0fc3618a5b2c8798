pub mod footer;
pub mod navbar;
pub mod status;
