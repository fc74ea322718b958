//! Stack program compiler implementation.

use crate::api::CompilationOptions;
use crate::compiler::CompileError;
use crate::evaluator::{ComparisonContext, evaluate_literal};
use crate::parser::{Node, NodeKind};
use crate::resolver::FunctionName;
use crate::values::Token;
use crate::vm::{Instruction, Program};
use crate::Vec;
use tracing::debug;

/// Compiler that turns a parse tree into a stack program.
///
/// Walks the tree post-order: a node's instruction is emitted only after the
/// instructions of all its children. Literals become pushes of tokens built
/// ahead of time; everything else becomes a deferred operation the VM runs
/// later. Nothing here reads runtime state, so the program works with any
/// resolvers.
pub struct StackCompiler<'o> {
    options: &'o CompilationOptions,

    instructions: Vec<Instruction>,

    /// Current stack depth during compilation
    current_stack_depth: usize,

    /// Maximum stack depth observed
    max_stack_size: usize,

    /// Current nesting depth of the walk
    nesting: usize,
}

impl<'o> StackCompiler<'o> {
    pub fn new(options: &'o CompilationOptions) -> Self {
        Self {
            options,
            instructions: Vec::new(),
            current_stack_depth: 0,
            max_stack_size: 0,
            nesting: 0,
        }
    }

    /// Convenience method to compile a tree in one call.
    pub fn compile(node: &Node<'_>, options: &CompilationOptions) -> Result<Program, CompileError> {
        let mut compiler = StackCompiler::new(options);
        compiler.visit(node)?;
        let program = compiler.finalize(node.text);
        debug!(
            source = %program.source,
            instructions = program.instructions.len(),
            max_stack_size = program.max_stack_size,
            "Compiled expression"
        );
        Ok(program)
    }

    /// Finalize compilation and return the program.
    pub fn finalize(self, source: &str) -> Program {
        Program {
            instructions: self.instructions,
            max_stack_size: self.max_stack_size,
            source: source.into(),
        }
    }

    /// Emit an instruction, tracking its effect on the stack: it pops its
    /// arity and pushes one result.
    fn emit(&mut self, instruction: Instruction) {
        let arity = instruction.arity();
        debug_assert!(
            self.current_stack_depth >= arity,
            "Stack underflow: trying to pop {} but depth is {}",
            arity,
            self.current_stack_depth
        );
        self.current_stack_depth = self.current_stack_depth.saturating_sub(arity) + 1;
        self.max_stack_size = self.max_stack_size.max(self.current_stack_depth);
        self.instructions.push(instruction);
    }

    fn visit(&mut self, node: &Node<'_>) -> Result<(), CompileError> {
        self.nesting += 1;
        if self.nesting > self.options.max_depth {
            return Err(CompileError::NestingTooDeep {
                max_depth: self.options.max_depth,
            });
        }
        self.visit_children(node)?;
        let instruction = self.exit(node)?;
        self.emit(instruction);
        self.nesting -= 1;
        Ok(())
    }

    fn visit_children(&mut self, node: &Node<'_>) -> Result<(), CompileError> {
        match &node.kind {
            NodeKind::Arithmetic { left, right, .. }
            | NodeKind::Comparison { left, right, .. }
            | NodeKind::Logical { left, right, .. } => {
                self.visit(left)?;
                self.visit(right)
            }
            NodeKind::Not(operand) => self.visit(operand),
            NodeKind::FunctionCall { args: items, .. } | NodeKind::List(items) => {
                items.iter().try_for_each(|item| self.visit(item))
            }
            NodeKind::Map(entries) => entries.iter().try_for_each(|(key, value)| {
                self.visit(key)?;
                self.visit(value)
            }),
            _ => Ok(()),
        }
    }

    /// The instruction for a node whose children have all been emitted.
    fn exit(&self, node: &Node<'_>) -> Result<Instruction, CompileError> {
        let instruction = match &node.kind {
            NodeKind::IntLiteral
            | NodeKind::LongLiteral
            | NodeKind::FloatLiteral
            | NodeKind::DoubleLiteral => Instruction::Push(evaluate_literal(node)?),
            NodeKind::StringLiteral(value) => Instruction::Push(Token::string(*value)),
            NodeKind::BooleanLiteral(value) => Instruction::Push(Token::boolean(*value)),
            NodeKind::NullLiteral => Instruction::Push(Token::null()),
            NodeKind::Arithmetic { op, .. } => Instruction::Arithmetic(*op),
            NodeKind::Comparison { op, .. } => {
                Instruction::Compare(ComparisonContext::from_token(op, node.text))
            }
            NodeKind::Logical { op, .. } => Instruction::Logical(*op),
            NodeKind::Not(_) => Instruction::Not,
            NodeKind::Variable(name) => Instruction::LoadVariable((*name).into()),
            NodeKind::FunctionCall {
                namespace,
                name,
                args,
            } => Instruction::Call {
                function: FunctionName::new(*namespace, name),
                arity: args.len(),
            },
            NodeKind::List(items) => Instruction::MakeList(items.len()),
            NodeKind::Map(entries) => Instruction::MakeMap(entries.len()),
            NodeKind::Unrecognized { rule, .. } => {
                return Err(CompileError::UnsupportedSyntax {
                    rule: (*rule).into(),
                    text: node.text.into(),
                });
            }
        };
        Ok(instruction)
    }
}
