pub mod data;
pub mod user;

pub use data::{DataRecord, NewDataRecord};
pub use user::{NewUser, PublicUser, Role, User};
