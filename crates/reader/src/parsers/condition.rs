use gridmenu_engine::{behavior, Condition};

use crate::error::ReadError;
use crate::fragment::Fragment;
use crate::registry::{ConditionParser, ParserContext};

/// `permission` holds when the viewer has the permission, `no_permission` when it does not.
#[derive(Debug, Clone, Copy)]
pub struct PermissionParser {
    expected: bool,
}

impl PermissionParser {
    pub fn granted() -> Self {
        Self { expected: true }
    }

    pub fn denied() -> Self {
        Self { expected: false }
    }
}

impl ConditionParser for PermissionParser {
    fn parse(&self, fragment: Fragment<'_>, _: &dyn ParserContext) -> Result<Condition, ReadError> {
        let permission = fragment
            .as_string()
            .ok_or_else(|| ReadError::Structural("Expected permission".into()))?;
        let expected = self.expected;
        Ok(behavior::condition(move |viewer| viewer.has_permission(&permission) == expected))
    }
}
