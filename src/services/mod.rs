pub mod dashboard_service;
pub mod folio_service;
pub mod housekeeping_service;
pub mod maintenance_service;
pub mod reservation_service;
