pub mod db;
pub mod draft;
pub mod matcher;
pub mod models;
pub mod pricing;
pub mod send;

pub use db::{ProposalRepository, RepositoryError};
pub use draft::{
    CustomerInfoUpdate, MAX_PHOTOS, ProposalDraft, ReviewSettingsUpdate, ValidationError,
};
pub use models::*;
pub use send::{MailerError, ProposalMailer, SendError, SigningRequest};
