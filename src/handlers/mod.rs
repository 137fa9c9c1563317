pub mod health;
pub mod submit;

pub use health::health_check;
pub use submit::submit;
