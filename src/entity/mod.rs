pub mod folio_items;
pub mod folios;
pub mod housekeeping_tasks;
pub mod maintenance_tickets;
pub mod payments;
pub mod properties;
pub mod reservations;
pub mod rooms;

pub use folio_items::Entity as FolioItems;
pub use folios::Entity as Folios;
pub use housekeeping_tasks::Entity as HousekeepingTasks;
pub use maintenance_tickets::Entity as MaintenanceTickets;
pub use payments::Entity as Payments;
pub use properties::Entity as Properties;
pub use reservations::Entity as Reservations;
pub use rooms::Entity as Rooms;
