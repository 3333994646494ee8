pub mod trace;
pub mod validate;
