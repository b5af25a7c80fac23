//! Core module containing the error taxonomy, id parsing, validation, and
//! the repository contracts the services program against

pub mod error;
pub mod id;
pub mod repository;
pub mod validation;

pub use error::{ApiError, ApiResult, FieldError, StorageError};
pub use id::parse_id;
pub use repository::{
    AuthorRepo, BlogRepo, CategoryRepo, CommentRepo, ProfileRepo, StorageResult, UserRepo,
};
pub use validation::{Schema, Validate, ValidatedJson};
