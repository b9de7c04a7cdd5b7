//! Command invocation value
//!
//! An `Invocation` names a program and its ordered argument list. Arguments
//! are handed to the OS as a discrete list; nothing here quotes, escapes, or
//! joins them into a shell command line.

use std::fmt;

/// A program plus its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Create an invocation with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments, preserving their order
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

/// Human-readable form for logs and error context. Never executed.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_preserves_order_and_duplicates() {
        let inv = Invocation::new("echo").arg("b").args(["a", "b", "a"]);

        assert_eq!(inv.program(), "echo");
        assert_eq!(inv.arguments(), &["b", "a", "b", "a"]);
    }

    #[test]
    fn test_invocation_without_args() {
        let inv = Invocation::new("true");
        assert!(inv.arguments().is_empty());
        assert_eq!(inv.to_string(), "true");
    }

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("git").args(["commit", "-m", "two words"]);
        assert_eq!(inv.to_string(), "git commit -m two words");
    }
}
