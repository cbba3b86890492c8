use strum_macros::Display;

pub mod calendar;
pub mod geofence;
pub mod leave;

/// Coarse class of a validation failure, so callers can tell a
/// misconfigured company apart from a bad request or a broken rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ViolationKind {
    Configuration,
    MissingInput,
    BusinessRule,
}
