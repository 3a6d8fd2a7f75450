pub mod dashboard;
pub mod folios;
pub mod housekeeping;
pub mod maintenance;
pub mod reservations;
