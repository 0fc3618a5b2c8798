pub mod ask_ai;
pub mod home;
pub mod maps;
pub mod not_found;
