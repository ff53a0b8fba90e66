//! Schema system - field registry, validation, templates and the collector

pub mod registry;
pub mod template;
pub mod validator;
pub mod wizard;

pub use registry::{FieldSpec, SchemaError, SchemaRegistry, SectionId, SectionLayout, ValueKind};
pub use template::{TemplateContext, TemplateGenerator};
pub use validator::{Advisory, ValidationError, ValidationReport, Validator};
pub use wizard::SchemaWizard;
