//! Emission options.

/// Naming knobs for generated routines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Prepended to the type id to form the routine name.
    pub prefix: String,
    /// Name of the routine's single parameter.
    pub value_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            prefix: "Dump".to_owned(),
            value_name: "value".to_owned(),
        }
    }
}
