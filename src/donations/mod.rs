mod donations_model;
mod donations_repository;
mod donations_service;
mod donations_traits;

pub use donations_model::{Donation, DonationDB, NewDonation};
pub use donations_repository::DonationRepository;
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
