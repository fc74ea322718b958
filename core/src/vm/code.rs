use crate::Vec;
use crate::vm::Instruction;
use ecow::EcoString;

/// A compiled stack program.
///
/// Built once by the compiler and never mutated afterwards. It owns all its
/// data, so it outlives the parse tree it came from and can be shared freely
/// between threads.
#[derive(Clone, PartialEq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// Deepest the operand stack gets while running this program.
    pub max_stack_size: usize,
    /// Source text of the compiled expression.
    pub source: EcoString,
}

impl core::fmt::Debug for Program {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Program {{")?;
        writeln!(f, "  source: {:?}", self.source.as_str())?;
        writeln!(f, "  max_stack_size: {}", self.max_stack_size)?;
        writeln!(f, "  instructions:")?;
        for (addr, instr) in self.instructions.iter().enumerate() {
            writeln!(f, "    {:4}  {}", addr, instr)?;
        }
        write!(f, "}}")
    }
}
