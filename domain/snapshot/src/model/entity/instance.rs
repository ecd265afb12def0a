/// Managed database instance. Read only from our side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instance {
    /// Instance identifier.
    pub id: String,
}

impl Instance {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
