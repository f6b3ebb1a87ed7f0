pub mod path;
pub mod split;
