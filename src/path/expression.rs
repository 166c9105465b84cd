use crate::metadata::instance::Value;

/// Accessor expression tree, the shape of a lambda such as `e => e.Departure.Airport`.
///
/// Only chains of member accesses, conversions and `Select` projections over collections form
/// property paths; everything else is representable so that it can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum PathExpression {
    /// A lambda parameter, e.g. `e`
    Parameter(String),
    /// Member access on `target`
    Member {
        /// The object the member is read from
        target: Box<PathExpression>,
        /// The member name
        name: String,
    },
    /// A static or extension method call; the receiver of an extension call is the first argument
    Call {
        /// The method name
        method: String,
        /// The call arguments
        arguments: Vec<PathExpression>,
    },
    /// A lambda expression
    Lambda {
        /// The parameter name
        parameter: String,
        /// The lambda body
        body: Box<PathExpression>,
    },
    /// A type conversion
    Convert(Box<PathExpression>),
    /// A constant value
    Constant(Value),
    /// An indexer or array index access
    Index {
        /// The indexed object
        target: Box<PathExpression>,
        /// The index
        index: Box<PathExpression>,
    },
}

/// Result of parsing an accessor expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPath {
    /// The expression refers to the root object itself, e.g. `e => e`
    Root,
    /// A dotted property path
    Path(String),
}

impl PathExpression {
    /// A parameter reference
    pub fn parameter(name: impl Into<String>) -> Self {
        PathExpression::Parameter(name.into())
    }

    /// A constant
    pub fn constant(value: impl Into<Value>) -> Self {
        PathExpression::Constant(value.into())
    }

    /// A lambda with the given parameter name and body
    pub fn lambda(parameter: impl Into<String>, body: PathExpression) -> Self {
        PathExpression::Lambda {
            parameter: parameter.into(),
            body: Box::new(body),
        }
    }

    /// Access `name` on this expression
    #[must_use]
    pub fn member(self, name: &str) -> Self {
        PathExpression::Member {
            target: Box::new(self),
            name: name.to_string(),
        }
    }

    /// Project each element of this collection, e.g. `.Select(x => x.Name)`
    ///
    /// ## Arguments
    /// * 'parameter' - The projection parameter name
    /// * 'body'      - Builds the projection body from the parameter
    #[must_use]
    pub fn select<F>(self, parameter: &str, body: F) -> Self
    where
        F: FnOnce(PathExpression) -> PathExpression,
    {
        let lambda = Self::lambda(parameter, body(Self::parameter(parameter)));
        PathExpression::Call {
            method: "Select".to_string(),
            arguments: vec![self, lambda],
        }
    }

    /// Call an extension method with this expression as receiver
    #[must_use]
    pub fn call(self, method: &str, arguments: Vec<PathExpression>) -> Self {
        let mut all = Vec::with_capacity(arguments.len() + 1);
        all.push(self);
        all.extend(arguments);
        PathExpression::Call {
            method: method.to_string(),
            arguments: all,
        }
    }

    /// Convert this expression to another type
    #[must_use]
    pub fn convert(self) -> Self {
        PathExpression::Convert(Box::new(self))
    }

    /// Index into this expression
    #[must_use]
    pub fn index(self, index: PathExpression) -> Self {
        PathExpression::Index {
            target: Box::new(self),
            index: Box::new(index),
        }
    }

    /// This expression without any enclosing conversions
    #[must_use]
    pub fn without_convert(&self) -> &PathExpression {
        let mut expression = self;
        while let PathExpression::Convert(inner) = expression {
            expression = inner;
        }
        expression
    }

    /// The body of a lambda, or the expression itself
    #[must_use]
    pub fn body(&self) -> &PathExpression {
        match self {
            PathExpression::Lambda { body, .. } => body,
            other => other,
        }
    }
}

/// Parses a member-access chain into a dotted path.
///
/// `Select` projections are flattened, so `e.Legs.Select(l => l.Departure)` becomes
/// `Legs.Departure`. Returns `None` for anything that is not a plain chain, such as calls to
/// other methods, indexers or constants.
#[must_use]
pub fn try_parse_path(expression: &PathExpression) -> Option<ParsedPath> {
    match expression.without_convert() {
        PathExpression::Parameter(_) => Some(ParsedPath::Root),
        PathExpression::Member { target, name } => Some(match try_parse_path(target)? {
            ParsedPath::Root => ParsedPath::Path(name.clone()),
            ParsedPath::Path(parent) => ParsedPath::Path(format!("{parent}.{name}")),
        }),
        PathExpression::Call { method, arguments } if method == "Select" && arguments.len() == 2 => {
            let ParsedPath::Path(parent) = try_parse_path(&arguments[0])? else {
                return None;
            };
            let PathExpression::Lambda { body, .. } = &arguments[1] else {
                return None;
            };
            match try_parse_path(body)? {
                ParsedPath::Path(this) => Some(ParsedPath::Path(format!("{parent}.{this}"))),
                ParsedPath::Root => None,
            }
        }
        _ => None,
    }
}
