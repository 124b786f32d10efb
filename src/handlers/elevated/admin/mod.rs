pub mod data;

pub use data::{create as data_create, delete as data_delete, update as data_update};
