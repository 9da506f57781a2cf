pub(crate) mod handler;
pub(crate) mod indexing;
pub(crate) mod state;

pub use state::RobotLanguageServer;
