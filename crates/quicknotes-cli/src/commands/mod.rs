pub mod maintenance;
pub mod misc;
pub mod notes;
