/// Rejections raised at the form's input boundary.
///
/// Field-level validation failures are not errors; they are reported
/// through [`ValidationState`](crate::validation::ValidationState).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Unknown field key or service id.
    #[error("Not found: {entity} '{id}'")]
    NotFound { entity: &'static str, id: String },

    /// A value that cannot be stored in the addressed field.
    #[error("Validation failed: {0}")]
    Validation(String),
}
