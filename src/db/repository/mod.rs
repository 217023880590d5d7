pub mod interaction;
pub mod points;
