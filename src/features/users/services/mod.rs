mod user_management_service;

pub use user_management_service::UserManagementService;
