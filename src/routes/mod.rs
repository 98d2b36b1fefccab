pub mod auth;

pub mod courses;

pub mod enrollments;

pub mod files;

pub mod submissions;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use files::configure_file_routes;
pub use submissions::configure_submissions_routes;
