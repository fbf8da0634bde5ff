mod distributions_model;
mod distributions_repository;
mod distributions_service;
mod distributions_traits;

pub use distributions_model::{Distribution, DistributionDB, NewDistribution};
pub use distributions_repository::DistributionRepository;
pub use distributions_service::DistributionService;
pub use distributions_traits::{DistributionRepositoryTrait, DistributionServiceTrait};
