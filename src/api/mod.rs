pub mod models;
pub mod superset;

pub use models::*;
pub use superset::*;
