//! User management feature (admin only).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/usermanagement/users` | All users |
//! | GET | `/api/usermanagement/users/role/{role}` | Users by role |
//! | GET | `/api/usermanagement/users/status/{status}` | Users by status |
//! | GET | `/api/usermanagement/{user_id}` | User with activity counters |
//! | GET | `/api/usermanagement/email/{email}` | User by email |
//! | PUT | `/api/usermanagement/{user_id}/status` | Set status |
//! | PUT | `/api/usermanagement/{user_id}/activate` | Activate |
//! | PUT | `/api/usermanagement/{user_id}/deactivate` | Deactivate |
//! | PUT | `/api/usermanagement/{user_id}/role` | Change role |
//! | GET | `/api/usermanagement/statistics/summary` | Totals by status and role |
//! | GET | `/api/usermanagement/search/{term}` | Search name/email |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserManagementService;
