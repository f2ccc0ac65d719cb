pub mod compiler;
pub mod instruction;

pub use compiler::compile;
pub use instruction::{Condition, Instruction, SenseDir, Turn};

use crate::error::{CompileError, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Compiled brain: instructions indexed by state.
///
/// Every jump target is in range and every marker id is below 6, so
/// indexing with an ant's state never fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brain {
    instructions: Vec<Instruction>,
}

impl Brain {
    pub(crate) fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of states
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always false for a compiled brain
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction for a state
    #[inline]
    pub fn get(&self, state: u32) -> Instruction {
        self.instructions[state as usize]
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Compile a brain from a file path
pub fn load_brain(path: impl AsRef<Path>) -> Result<Brain> {
    let source = fs::read_to_string(path)?;
    Ok(compile(&source)?)
}

impl FromStr for Brain {
    type Err = CompileError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        compile(s)
    }
}
