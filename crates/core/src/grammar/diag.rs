pub use eng_toolchain_diagnostics::{Diagnostic, Severity, Span, codes};
