//! Completion specifications: per-command rules (`-W` word list, `-F`
//! function, `-C` external program), the `complete` / `compgen` builtins that
//! manage them, and the external completer protocol.
//!
//! Failures of external completers never surface to the editor: they are
//! logged under `compspec.external` and produce an empty candidate list so a
//! [`ChainedSource`] can fall back to the next source.

pub mod builtin;
pub mod context;
pub mod eval;
pub mod external;
pub mod parse;
pub mod source;
pub mod spec;

pub use builtin::{Builtin, CompgenCommand, CompleteCommand, SpecError, parse_builtin, run_builtin};
pub use context::CompletionContext;
pub use eval::{FunctionInvoker, ReplyFilter, SpecEvaluator};
pub use external::{CompleterError, ExternalCompleterRunner, ProcessRunner};
pub use parse::parse_output;
pub use source::{ChainedSource, SharedRegistry, SpecCompletionSource};
pub use spec::{CompletionSpec, SpecKind, SpecRegistry};
