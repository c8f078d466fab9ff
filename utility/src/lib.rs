pub mod env;
pub mod errors;
