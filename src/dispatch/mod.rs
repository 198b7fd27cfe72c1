//! Name-based command dispatch
//!
//! A thin lookup-and-invoke utility, deliberately outside the
//! specialization engine: callers type `TypeName.FunctionName`, the registry
//! resolves a zero-argument function under that name and prints its result.
//! The interactive loop reads names until end-of-input or `.exit`.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// A dispatchable zero-argument function returning printable output
pub type CommandFn = Box<dyn Fn() -> String>;

/// Registry of `Type.function` → callable
#[derive(Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, FxHashMap<String, CommandFn>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under a type name
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        function: impl Into<String>,
        callable: impl Fn() -> String + 'static,
    ) {
        self.functions
            .entry(type_name.into())
            .or_default()
            .insert(function.into(), Box::new(callable));
    }

    /// Resolve and invoke `TypeName.FunctionName`.
    ///
    /// The final dot separates the function from the (possibly dotted) type
    /// name. Fails with `TypeNotResolvable` for an unknown type segment and
    /// `UnknownFunction` for an unknown function on a known type.
    pub fn call(&self, full_name: &str) -> Result<String> {
        let (type_name, function) = full_name
            .rsplit_once('.')
            .ok_or_else(|| Error::TypeNotResolvable(full_name.to_string()))?;

        let functions = self
            .functions
            .get(type_name)
            .ok_or_else(|| Error::TypeNotResolvable(type_name.to_string()))?;
        let callable = functions.get(function).ok_or_else(|| Error::UnknownFunction {
            type_name: type_name.to_string(),
            function: function.to_string(),
        })?;
        Ok(callable())
    }

    /// All registered `Type.function` names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .functions
            .iter()
            .flat_map(|(type_name, functions)| {
                functions
                    .keys()
                    .map(move |function| format!("{}.{}", type_name, function))
            })
            .collect();
        names.sort();
        names
    }

    /// Run the interactive dispatch loop until end-of-input or `.exit`
    pub fn run_loop(&self) -> Result<()> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| Error::internal(format!("failed to start line editor: {}", e)))?;
        println!("recast dispatch - enter TypeName.FunctionName (.list, .exit)");

        loop {
            match editor.readline(">> ") {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(input);
                    match input {
                        ".exit" | ".quit" | ".q" => break,
                        ".list" => {
                            for name in self.names() {
                                println!("{}", name);
                            }
                        }
                        _ => match self.call(input) {
                            Ok(output) => println!("{}", output),
                            Err(e) => eprintln!("{}", e),
                        },
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    return Err(Error::internal(format!("readline failed: {}", e)));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        registry.register("Engine", "Version", || "0.1.0".to_string());
        registry.register("Engine", "Ping", || "pong".to_string());
        registry
    }

    #[test]
    fn test_call_resolves_and_invokes() {
        assert_eq!(registry().call("Engine.Ping").unwrap(), "pong");
    }

    #[test]
    fn test_unknown_type() {
        let err = registry().call("Ghost.Ping").unwrap_err();
        assert!(matches!(err, Error::TypeNotResolvable(_)));
    }

    #[test]
    fn test_unknown_function() {
        let err = registry().call("Engine.Missing").unwrap_err();
        assert!(matches!(err, Error::UnknownFunction { .. }));
    }

    #[test]
    fn test_undotted_name_is_not_resolvable() {
        let err = registry().call("Ping").unwrap_err();
        assert!(matches!(err, Error::TypeNotResolvable(_)));
    }

    #[test]
    fn test_dotted_type_segment() {
        let mut registry = FunctionRegistry::new();
        registry.register("Recast.Engine", "Version", || "ok".to_string());
        assert_eq!(registry.call("Recast.Engine.Version").unwrap(), "ok");
    }

    #[test]
    fn test_names_are_sorted() {
        assert_eq!(registry().names(), vec!["Engine.Ping", "Engine.Version"]);
    }
}
