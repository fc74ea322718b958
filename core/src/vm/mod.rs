mod code;
mod instruction_set;
mod runtime;
mod stack;


pub use code::Program;
pub use instruction_set::Instruction;
pub use runtime::VM;

pub(crate) use stack::Stack;
