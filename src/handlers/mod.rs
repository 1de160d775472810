mod begin_auth;
mod index;
mod not_found;
mod oauth_callback;
mod upload;

pub use begin_auth::begin_auth;
pub use index::index;
pub use not_found::not_found;
pub use oauth_callback::oauth_callback;
pub use upload::upload;
