//! Shared helpers for the behaviour-driven suites.
//!
//! `locale::StepLocale` strips quotes from locale parameters so scenarios
//! can spell blank candidates as `"  "`.
pub mod locale;
