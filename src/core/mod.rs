//! Core module - record model, configuration and logging

pub mod config;
pub mod logging;
pub mod ordered;
pub mod record;

pub use config::{Branding, Config};
pub use ordered::OrderedMap;
pub use record::{FieldValue, InspectionHeader, InspectionRecord, InspectionType, SectionData};
