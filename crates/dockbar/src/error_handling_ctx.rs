use crate::action::ActionParseError;

/// Print an error that ended the program.
/// Invalid user input gets a plain message, everything else the full error chain.
pub fn print_error(err: anyhow::Error) {
    if err.is::<ActionParseError>() {
        eprintln!("{}", format_error(&err));
    } else {
        log::error!("{}", format_error(&err));
    }
}

pub fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ActionParseError>() {
        Some(err) => err.to_string(),
        None => format!("{:?}", err),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_error() {
        let err = anyhow::Error::from(ActionParseError::NotANumber("x".to_string()));
        assert_eq!("Argument must be positive integer. Found x", format_error(&err));

        let err = Err::<(), _>(std::io::Error::other("refused")).context("Failed to connect").unwrap_err();
        assert!(format_error(&err).contains("Failed to connect"));
        assert!(format_error(&err).contains("refused"));
    }
}
