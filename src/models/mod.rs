pub mod assignments;
pub mod common;
pub mod courses;
pub mod reviews;
pub mod submissions;

pub use common::alert::{Alert, AlertColor};
pub use common::response::{RpcResponse, RpcStatus};
