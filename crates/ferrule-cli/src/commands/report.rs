//! Failure reporting and exit codes shared by subcommands.
//!
//! Exit code mapping: 0 success, 1 input errors (structural or
//! semantic), 2 internal pipeline bugs.

use crate::output::StyledOutput;
use ferrule_codegen::BuildFailure;

/// Exit code for malformed or semantically invalid input.
pub const EXIT_INPUT: i32 = 1;
/// Exit code for internal pipeline failures.
pub const EXIT_INTERNAL: i32 = 2;

/// Print a build failure to stderr and return its exit code.
pub fn report_failure(out: &mut StyledOutput, failure: &BuildFailure) -> i32 {
    match failure {
        BuildFailure::Structural { errors } => {
            out.stderr_error(&format!("error: {}\n", failure));
            for err in errors {
                out.stderr_plain(&format!("  {}\n", err));
            }
            EXIT_INPUT
        }
        BuildFailure::Semantic { errors } => {
            out.stderr_error(&format!("error: {}\n", failure));
            for err in errors {
                out.stderr_plain(&format!("  {}\n", err));
            }
            EXIT_INPUT
        }
        BuildFailure::Internal(err) => {
            out.stderr_error(&format!(
                "internal error: {} (this is a ferrule bug, please report it)\n",
                err
            ));
            EXIT_INTERNAL
        }
    }
}
