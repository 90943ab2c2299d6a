/// Restricts which contexts may use a particular enum value; only present
/// from protocol 1.13.0 (§3.3, §4.4).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandEnumConstraint {
    /// Name of the value this constraint affects — must be a member of
    /// `enum_name`'s value list.
    pub affected_value: String,
    pub enum_name: String,
    pub constraint_ids: Vec<u8>,
}

impl CommandEnumConstraint {
    pub fn new(
        affected_value: impl Into<String>,
        enum_name: impl Into<String>,
        constraint_ids: Vec<u8>,
    ) -> Self {
        Self {
            affected_value: affected_value.into(),
            enum_name: enum_name.into(),
            constraint_ids,
        }
    }
}
