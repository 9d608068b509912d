pub mod parse;
pub mod validate;
pub mod bench;
