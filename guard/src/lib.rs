//! Structural validation of call arguments.
//!
//! Every argument of a call is walked recursively and the call is refused
//! when a number does not re-parse, a string holds a forbidden character, or
//! the structure nests past the configured ceiling.

pub mod arguments;
pub mod config;
pub mod interceptor;
pub mod report;
pub mod validator;
pub mod value;

pub use arguments::{ArgumentSet, ModelState};
pub use config::ValidatorConfig;
pub use interceptor::{ArgumentInterceptor, Decision, ParameterFilter, Refusal};
pub use report::{FieldPath, Reason, Rejection, Segment, Verdict};
pub use validator::StructuralValidator;
pub use value::{Composite, Value};
