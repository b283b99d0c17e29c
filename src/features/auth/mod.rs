mod jwt;

pub mod guards;
pub mod model;

pub use jwt::JwtValidator;
