pub mod assignments;
pub mod reviews;
pub mod submissions;

pub use assignments::AssignmentService;
pub use reviews::ReviewService;
pub use submissions::SubmissionService;
