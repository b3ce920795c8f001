pub mod compose;
pub mod judge;
