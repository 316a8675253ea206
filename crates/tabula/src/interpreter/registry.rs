//! Function registry for storing and looking up built-in functions.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::interpreter::EvalError;
use crate::interpreter::functions::builtin_signatures;
use crate::types::{Value, ValueType};

/// Function body signature.
///
/// Takes the evaluated arguments in call order and returns the call's value.
/// Bodies may return error values; `Err` is reserved for faults.
pub type FunctionBody = fn(Vec<Value>) -> Result<Value, EvalError>;

/// A declared function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub expected: ValueType,
    /// A variadic parameter matches every remaining argument.
    pub variadic: bool,
}

impl Parameter {
    pub const fn new(name: &'static str, expected: ValueType) -> Self {
        Self {
            name,
            expected,
            variadic: false,
        }
    }

    pub const fn variadic(name: &'static str, expected: ValueType) -> Self {
        Self {
            name,
            expected,
            variadic: true,
        }
    }
}

/// A function's name, parameters, return type and body.
///
/// Parameters are split into fixed positions and at most one trailing
/// variadic slot. The return type is informational and not checked against
/// what the body produces.
#[derive(Debug, Clone)]
pub struct Signature {
    name: &'static str,
    fixed: Vec<Parameter>,
    variadic: Option<Parameter>,
    returns: ValueType,
    body: FunctionBody,
}

impl Signature {
    /// Build a signature from an ordered parameter list.
    ///
    /// Returns an error if the name is not canonical upper-case or if a
    /// variadic parameter is followed by another parameter.
    pub fn new(
        name: &'static str,
        parameters: Vec<Parameter>,
        returns: ValueType,
        body: FunctionBody,
    ) -> Result<Self, EvalError> {
        let invalid = |reason: &str| EvalError::InvalidSignature {
            function: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() || name != name.to_uppercase() {
            return Err(invalid("name must be non-empty upper-case"));
        }

        let mut fixed = parameters;
        let variadic = match fixed.iter().position(|p| p.variadic) {
            Some(index) if index + 1 != fixed.len() => {
                return Err(invalid("only the last parameter may be variadic"));
            }
            Some(_) => fixed.pop(),
            None => None,
        };

        Ok(Self {
            name,
            fixed,
            variadic,
            returns,
            body,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn returns(&self) -> ValueType {
        self.returns
    }

    /// Number of declared parameters; the variadic slot counts once.
    pub fn arity(&self) -> usize {
        self.fixed.len() + usize::from(self.variadic.is_some())
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// The parameter matched by the argument at `index`, if any.
    pub fn parameter_at(&self, index: usize) -> Option<&Parameter> {
        self.fixed.get(index).or(self.variadic.as_ref())
    }

    /// Declared parameters in order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.fixed.iter().chain(self.variadic.as_ref())
    }

    /// Run the body.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, EvalError> {
        (self.body)(args)
    }
}

static BUILTIN: LazyLock<Result<FunctionRegistry, EvalError>> =
    LazyLock::new(FunctionRegistry::with_builtins);

/// A registry of callable functions, looked up case-insensitively.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    /// Signatures in registration order.
    functions: Vec<Signature>,
    /// Maps canonical upper-case name to its index in `functions`.
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    /// The shared registry of built-in functions.
    ///
    /// Built on first use; returns an error if a built-in signature is
    /// invalid.
    pub fn builtin() -> Result<&'static FunctionRegistry, EvalError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    fn with_builtins() -> Result<Self, EvalError> {
        let mut registry = Self::default();
        for signature in builtin_signatures()? {
            registry.insert(signature)?;
        }
        Ok(registry)
    }

    /// Get a function by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.index
            .get(&name.to_uppercase())
            .and_then(|&i| self.functions.get(i))
    }

    /// Names of all functions in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.iter().map(Signature::name).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Add a signature. Returns an error if the name is already taken.
    fn insert(&mut self, signature: Signature) -> Result<(), EvalError> {
        let name = signature.name().to_string();
        if self.index.contains_key(&name) {
            return Err(EvalError::InvalidSignature {
                function: name,
                reason: "duplicate function name".to_string(),
            });
        }
        self.index.insert(name, self.functions.len());
        self.functions.push(signature);
        Ok(())
    }
}
