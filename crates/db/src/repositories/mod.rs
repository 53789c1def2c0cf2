mod catalog_repo;
mod design_cp_repo;
mod estimation_repo;
mod execution_repo;
mod planning_repo;
mod project_repo;
mod user_repo;

pub use catalog_repo::CatalogRepo;
pub use design_cp_repo::DesignCpRepo;
pub use estimation_repo::EstimationRepo;
pub use execution_repo::ExecutionRepo;
pub use planning_repo::PlanningRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
