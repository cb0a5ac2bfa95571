//! Error handling foundation for flowsketch.
//!
//! Only the `Result` alias lives here. The workflow crate and the CLI each
//! define their own error enums and wrap them in a rootcause [`Report`] at
//! the boundary where the error leaves their layer.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "broken")
        }
    }

    impl std::error::Error for Broken {}

    fn fails() -> Result<(), Broken> {
        Err(Broken)?
    }

    #[test]
    fn result_type_works() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.expect("should be ok"), 42);
    }

    #[test]
    fn typed_context_converts_into_report() {
        let err = fails().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
