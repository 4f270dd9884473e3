pub mod model;
pub mod redirect;

pub use model::{RedirectConfig, RedirectRule};
pub use redirect::context::{EntityState, EvalContext, RequestState, Subject};
pub use redirect::diagnostics::{
    EvaluationDiagnostic, EvaluationOutcome, RedirectDecision, RuleDiagnostic, RuleStatus,
};
pub use redirect::error::RedirectError;
pub use redirect::evaluator::{evaluate, evaluate_with_trace};
pub use redirect::expander::{expand_url, QUERY_KEY};
pub use redirect::guard::{is_falsy, is_truthy};
pub use redirect::listener::RedirectListener;
pub use redirect::registry::{Reader, ReaderRegistry, BUILTIN_READERS};
