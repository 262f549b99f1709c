pub mod repository;

pub use repository::{ProposalRepository, RepositoryError};
