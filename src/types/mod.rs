pub mod flagged_day;
pub mod frames;
pub mod normals;
pub mod raw_row;
pub mod season;
pub mod year;
