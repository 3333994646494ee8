pub mod mentor;
pub mod session;
mod store;

pub use store::{Page, Paging, Store};
