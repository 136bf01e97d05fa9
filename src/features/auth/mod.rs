mod validator;

pub mod guards;
pub mod model;
pub mod policy;

pub use validator::JwtValidator;
