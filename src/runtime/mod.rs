pub mod session;

pub use session::{SessionContext, start_session};
