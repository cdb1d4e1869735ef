pub mod session;
pub mod value;
