mod backend;

pub use backend::{MockHistoryResult, MockQuizBackend, MockQuizResult, TrackedCall};
