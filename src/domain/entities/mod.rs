//! Core domain entities.
//!
//! Entities are plain data structures. Creation payloads live next to the
//! entity they produce (`NewMapping`, `NewAccount`).
//!
//! - [`UrlMapping`] - a short code and the URL it resolves to
//! - [`ClickEvent`] / [`DailyClicks`] - recorded resolutions and their daily buckets
//! - [`Account`], [`Session`], [`PasswordResetToken`] - authentication records

pub mod account;
pub mod click;
pub mod mapping;

pub use account::{Account, NewAccount, PasswordResetToken, ROLE_USER, Session};
pub use click::{ClickEvent, DailyClicks};
pub use mapping::{NewMapping, UrlMapping};
