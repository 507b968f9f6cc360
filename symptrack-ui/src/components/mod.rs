//! UI Components
//!
//! Reusable Leptos components shared by the screens.

pub mod chart;
pub mod field;
pub mod guard;
pub mod loading;
pub mod nav;
pub mod severity_badge;
pub mod toast;

pub use chart::{BarChart, ScoreBar};
pub use field::{SelectField, TextArea, TextField};
pub use guard::Guard;
pub use loading::{ListSkeleton, Loading};
pub use nav::Nav;
pub use severity_badge::{RiskBadge, SeverityBadge};
pub use toast::Toast;
