//! Pages
//!
//! One component per screen.

pub mod alerts;
pub mod dashboard;
pub mod hospitals;
pub mod login;
pub mod predict;
pub mod profile;
pub mod register;
pub mod vlogs;

pub use alerts::Alerts;
pub use dashboard::Dashboard;
pub use hospitals::Hospitals;
pub use login::Login;
pub use predict::Predict;
pub use profile::Profile;
pub use register::Register;
pub use vlogs::Vlogs;
