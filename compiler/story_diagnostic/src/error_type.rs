use std::fmt;

/// Tags for every user-facing compile failure.
///
/// The tag strings are part of the diagnostics contract: external renderers
/// and tooling match on them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorType {
    // Identifiers
    /// Reserved keyword used as an identifier
    ReservedKeyword,
    /// Keyword reserved for future use
    FutureReservedKeyword,
    /// Identifier starting with `__`
    PathNameInternal,

    // Assignments
    /// `{} = value`
    ObjectDestructoringNoVariables,
    /// Inline expression on the left-hand side
    AssignmentInlineExpression,
    /// `{a, b} += value`
    OperatorAssignmentDestructoring,

    // Literals
    /// Single quotes without `allow_single_quotes`
    SingleQuotes,

    // Statements
    /// Service name containing a `.`
    ServicePath,
    /// Argument statement without a service before it
    ArgumentsNoService,
    /// `return` outside a function body
    ReturnOutside,

    // Calls
    /// Declared argument missing from a call
    FunctionArgRequired,
    /// Call argument unknown to the signature
    FunctionArgInvalid,
    /// Argument type not implicitly castable to the declared type
    FunctionArgTypeMismatch,
    /// Function declared twice
    FunctionRedeclared,
}

impl ErrorType {
    /// The `error_type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ReservedKeyword => "reserved_keyword",
            ErrorType::FutureReservedKeyword => "future_reserved_keyword",
            ErrorType::PathNameInternal => "path_name_internal",
            ErrorType::ObjectDestructoringNoVariables => "object_destructoring_no_variables",
            ErrorType::AssignmentInlineExpression => "assignment_inline_expression",
            ErrorType::OperatorAssignmentDestructoring => "operator_assignment_destructoring",
            ErrorType::SingleQuotes => "single_quotes",
            ErrorType::ServicePath => "service-path",
            ErrorType::ArgumentsNoService => "arguments-noservice",
            ErrorType::ReturnOutside => "return-outside",
            ErrorType::FunctionArgRequired => "function_arg_required",
            ErrorType::FunctionArgInvalid => "function_arg_invalid",
            ErrorType::FunctionArgTypeMismatch => "function_arg_type_mismatch",
            ErrorType::FunctionRedeclared => "function_redeclared",
        }
    }

    /// Human-readable reason, filled from the error's format arguments.
    ///
    /// Missing arguments render as `?` rather than failing.
    pub fn reason(&self, arg: impl Fn(&str) -> Option<String>) -> String {
        let get = |key: &str| arg(key).unwrap_or_else(|| "?".to_string());
        match self {
            ErrorType::ReservedKeyword => {
                format!("`{}` is a reserved keyword", get("keyword"))
            }
            ErrorType::FutureReservedKeyword => {
                format!("`{}` is reserved for future use", get("keyword"))
            }
            ErrorType::PathNameInternal => {
                "Names starting with `__` are reserved for internal use".to_string()
            }
            ErrorType::ObjectDestructoringNoVariables => {
                "Object destructuring requires at least one variable".to_string()
            }
            ErrorType::AssignmentInlineExpression => {
                "Inline expressions can't be assigned to".to_string()
            }
            ErrorType::OperatorAssignmentDestructoring => {
                "Operator assignments are only allowed on variables".to_string()
            }
            ErrorType::SingleQuotes => "Strings must use double quotes".to_string(),
            ErrorType::ServicePath => {
                "Service names can only contain alphanumeric characters, dashes and backslashes"
                    .to_string()
            }
            ErrorType::ArgumentsNoService => "Missing service before service arguments".to_string(),
            ErrorType::ReturnOutside => "Return can't be used outside functions".to_string(),
            ErrorType::FunctionArgRequired => format!(
                "{} `{}` requires the argument `{}`",
                get("fn_type"),
                get("name"),
                get("arg")
            ),
            ErrorType::FunctionArgInvalid => format!(
                "{} `{}` has no argument `{}`",
                get("fn_type"),
                get("name"),
                get("arg")
            ),
            ErrorType::FunctionArgTypeMismatch => format!(
                "{} `{}` expects `{}` for argument `{}`, but got `{}`",
                get("fn_type"),
                get("name"),
                get("target"),
                get("arg"),
                get("source")
            ),
            ErrorType::FunctionRedeclared => {
                format!("Function `{}` has already been declared", get("name"))
            }
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
