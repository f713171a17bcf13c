pub mod staff;
pub mod standard_replies;
pub mod time;
pub mod tokens;
