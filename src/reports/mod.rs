mod reports_model;
mod reports_service;

pub use reports_model::{
    DonationByType, DonorContribution, DonorReport, InventoryItem, InventoryReport,
};
pub use reports_service::ReportService;
