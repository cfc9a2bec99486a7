//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod appeal_repo;
pub mod device_name_repo;
pub mod duplicate_movie_repo;
pub mod maintenance_repo;
pub mod movie_repo;
pub mod results_repo;
pub mod vote_repo;

pub use admin_user_repo::AdminUserRepo;
pub use appeal_repo::AppealRepo;
pub use device_name_repo::DeviceNameRepo;
pub use duplicate_movie_repo::DuplicateMovieRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use movie_repo::MovieRepo;
pub use results_repo::ResultsRepo;
pub use vote_repo::VoteRepo;
