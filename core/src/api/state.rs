use crate::api::Context;
use crate::resolver::{
    EmptyFunctionResolver, EmptyVariableResolver, FunctionResolver, VariableResolver,
};

/// Everything one execution may consult besides the program itself.
///
/// Built per record by the caller and never stored in a compiled expression.
#[derive(Clone, Copy)]
pub struct ExpressionState<'s> {
    pub context: &'s Context,
    pub variables: &'s dyn VariableResolver,
    pub functions: &'s dyn FunctionResolver,
}

static EMPTY_CONTEXT: once_cell::sync::Lazy<Context> = once_cell::sync::Lazy::new(Context::new);

impl<'s> ExpressionState<'s> {
    pub fn new(
        context: &'s Context,
        variables: &'s dyn VariableResolver,
        functions: &'s dyn FunctionResolver,
    ) -> Self {
        Self {
            context,
            variables,
            functions,
        }
    }

    /// No context, no variables and no functions.
    pub fn empty() -> ExpressionState<'static> {
        ExpressionState {
            context: &EMPTY_CONTEXT,
            variables: &EmptyVariableResolver,
            functions: &EmptyFunctionResolver,
        }
    }

    /// Only variables; function calls fail with `NotFound`.
    pub fn with_variables(variables: &'s dyn VariableResolver) -> Self {
        Self {
            context: &EMPTY_CONTEXT,
            variables,
            functions: &EmptyFunctionResolver,
        }
    }
}
