mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod shell;
pub use shell::Shell;

mod screens;
pub use screens::{
    Dashboard, EntityList, IncidentDetail, NotFound, OrderDetail, Profile, RaiseTicket, Reconciliation,
};
