use std::{fmt, str::FromStr};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("Must provide an action (integer)")]
    Empty,
    #[error("Argument must be positive integer. Found {0}")]
    NotANumber(String),
    #[error("Action {0} is too large")]
    TooLarge(String),
}

/// Index of an action selected on the bar, either by clicking a button or from the action listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionIndex(pub u32);

impl ActionIndex {
    /// The key reported in the `ActionInvoked` bus signal.
    pub fn action_key(&self) -> String {
        self.0.to_string()
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActionIndex {
    type Err = ActionParseError;

    /// Only plain ascii digits are accepted, so signs and whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ActionParseError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ActionParseError::NotANumber(s.to_string()));
        }
        s.parse::<u32>().map(ActionIndex).map_err(|_| ActionParseError::TooLarge(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_action_index() {
        assert_eq!(Ok(ActionIndex(0)), "0".parse());
        assert_eq!(Ok(ActionIndex(12)), "12".parse());
        assert_eq!(Ok(ActionIndex(7)), "007".parse());
        assert_eq!(Err(ActionParseError::Empty), "".parse::<ActionIndex>());
        assert_eq!(Err(ActionParseError::NotANumber("-1".to_string())), "-1".parse::<ActionIndex>());
        assert_eq!(Err(ActionParseError::NotANumber(" 1".to_string())), " 1".parse::<ActionIndex>());
        assert_eq!(Err(ActionParseError::NotANumber("one".to_string())), "one".parse::<ActionIndex>());
        assert_eq!(Err(ActionParseError::TooLarge("99999999999".to_string())), "99999999999".parse::<ActionIndex>());
    }

    #[test]
    fn test_action_key() {
        assert_eq!("3", ActionIndex(3).action_key());
        assert_eq!("Argument must be positive integer. Found x", ActionParseError::NotANumber("x".to_string()).to_string());
    }
}
