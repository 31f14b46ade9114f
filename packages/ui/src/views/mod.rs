mod shell_layout;
pub use shell_layout::ShellLayout;

mod entity_screen;
pub use entity_screen::EntityScreen;

mod dashboard;
pub use dashboard::DashboardView;

mod order_detail;
pub use order_detail::OrderDetailView;

mod order_create;

mod incident_detail;
pub use incident_detail::IncidentDetailView;

mod raise_ticket;
pub use raise_ticket::RaiseTicketView;

mod reconciliation;
pub use reconciliation::ReconciliationView;

mod profile;
pub use profile::ProfileView;
