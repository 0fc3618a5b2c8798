pub mod care_map;
pub mod map_renderer;
pub mod place_info;
pub mod place_marker;
