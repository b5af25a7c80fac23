//! Service layer
//!
//! One service per entity, each holding the shared [`Storage`] bundle.
//! Services resolve cross-entity relations eagerly, enforce business
//! rules, and translate storage constraint violations into
//! entity-specific API errors.

pub mod authors;
pub mod blogs;
pub mod categories;
pub mod comments;
pub mod profiles;
pub mod users;

pub use authors::AuthorService;
pub use blogs::BlogService;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use profiles::ProfileService;
pub use users::UserService;
