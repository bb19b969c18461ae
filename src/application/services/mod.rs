//! Business logic services for the application layer.

pub mod analytics;
pub mod auth_service;
pub mod click_recorder;
pub mod mailer;
pub mod mapping_registry;

pub use analytics::AnalyticsAggregator;
pub use auth_service::{AuthService, AuthSession, AuthSettings};
pub use click_recorder::ClickRecorder;
pub use mailer::{LogMailer, Mailer};
pub use mapping_registry::MappingRegistry;
