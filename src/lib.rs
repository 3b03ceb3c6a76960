pub mod focal_plane;
pub mod logger;
