//! Shared application state injected into every handler.

use chrono::{Duration, FixedOffset, Offset, Utc};
use std::sync::Arc;

use crate::application::services::{
    AnalyticsAggregator, AuthService, AuthSettings, ClickRecorder, LogMailer, Mailer,
    MappingRegistry,
};
use crate::config::Config;
use crate::domain::repositories::{
    AccountRepository, ClickRepository, MappingRepository, PasswordResetRepository,
    SessionRepository,
};
use crate::infrastructure::Stores;
use crate::utils::code_generator::RandomCodeGenerator;

pub type Registry = MappingRegistry<dyn MappingRepository>;
pub type Recorder = ClickRecorder<dyn ClickRepository>;
pub type Analytics = AnalyticsAggregator<dyn MappingRepository, dyn ClickRepository>;
pub type Auth = AuthService<dyn AccountRepository, dyn SessionRepository, dyn PasswordResetRepository>;

/// Runtime settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub public_base_url: String,
    pub code_max_attempts: usize,
    pub report_offset: FixedOffset,
    pub auth: AuthSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_string(),
            code_max_attempts: 5,
            report_offset: Utc.fix(),
            auth: AuthSettings::default(),
        }
    }
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        // Range is checked by Config::validate
        let report_offset = FixedOffset::east_opt(config.report_utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix());

        Self {
            public_base_url: config.public_base_url.clone(),
            code_max_attempts: config.code_max_attempts,
            report_offset,
            auth: AuthSettings {
                signing_secret: config.token_signing_secret.clone(),
                session_ttl: Duration::hours(config.session_ttl_hours),
                reset_token_ttl: Duration::minutes(config.reset_token_ttl_minutes),
                public_base_url: config.public_base_url.clone(),
            },
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub recorder: Arc<Recorder>,
    pub analytics: Arc<Analytics>,
    pub auth_service: Arc<Auth>,
    /// Used by the health check.
    pub mappings: Arc<dyn MappingRepository>,
    pub public_base_url: String,
}

impl AppState {
    /// Wires services over `stores`, mailing reset links through [`LogMailer`].
    pub fn new(stores: Stores, settings: AppSettings) -> Self {
        Self::with_mailer(stores, settings, Arc::new(LogMailer))
    }

    pub fn with_mailer(stores: Stores, settings: AppSettings, mailer: Arc<dyn Mailer>) -> Self {
        let registry = MappingRegistry::with_generator(
            stores.mappings.clone(),
            Arc::new(RandomCodeGenerator),
            settings.code_max_attempts,
        );
        let recorder = ClickRecorder::new(stores.clicks.clone());
        let analytics = AnalyticsAggregator::with_offset(
            stores.mappings.clone(),
            stores.clicks.clone(),
            settings.report_offset,
        );
        let auth_service = AuthService::new(
            stores.accounts,
            stores.sessions,
            stores.resets,
            mailer,
            settings.auth,
        );

        Self {
            registry: Arc::new(registry),
            recorder: Arc::new(recorder),
            analytics: Arc::new(analytics),
            auth_service: Arc::new(auth_service),
            mappings: stores.mappings,
            public_base_url: settings.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute short URL for `short_code`.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.public_base_url, short_code)
    }
}
