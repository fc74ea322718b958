use crate::api::{ExecutionOptions, ExpressionState};
use crate::evaluator::{
    ComparisonDispatcher, EvalError, eval_arithmetic, eval_logical, eval_not,
};
use crate::resolver::FunctionName;
use crate::values::{Token, Value};
use crate::vm::{Instruction, Program, Stack};
use crate::format;
use ecow::EcoString;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Function arguments; most calls take a handful.
type Args = SmallVec<[Value; 4]>;

/// Replays one program against one expression state.
///
/// Each `VM` owns a fresh operand stack and borrows everything else, so any
/// number of them may run the same program at the same time.
pub struct VM<'a> {
    program: &'a Program,
    state: &'a ExpressionState<'a>,
    options: &'a ExecutionOptions,
    stack: Stack<Token>,
    dispatcher: ComparisonDispatcher,
}

impl<'a> VM<'a> {
    pub fn new(
        program: &'a Program,
        state: &'a ExpressionState<'a>,
        options: &'a ExecutionOptions,
    ) -> Self {
        VM {
            program,
            state,
            options,
            stack: Stack::new(program.max_stack_size),
            dispatcher: ComparisonDispatcher::new(),
        }
    }

    /// Run the program to completion and return its single result.
    pub fn run(mut self) -> Result<Token, EvalError> {
        for (ip, instruction) in self.program.instructions.iter().enumerate() {
            trace!(ip, %instruction, depth = self.stack.len(), "Executing");
            let result = self.step(instruction)?;
            if self.stack.len() >= self.stack.capacity() {
                return Err(invalid_program(format!(
                    "operand stack exceeds its declared maximum of {}",
                    self.stack.capacity()
                )));
            }
            self.stack.push(result);
        }
        if self.stack.len() != 1 {
            return Err(invalid_program(format!(
                "expected a single result on the operand stack, found {}",
                self.stack.len()
            )));
        }
        self.pop()
    }

    fn step(&mut self, instruction: &Instruction) -> Result<Token, EvalError> {
        match instruction {
            Instruction::Push(token) => Ok(token.clone()),
            Instruction::Arithmetic(op) => {
                let (left, right) = self.pop_pair()?;
                eval_arithmetic(*op, &left, &right)
            }
            Instruction::Compare(context) => {
                let (left, right) = self.pop_pair()?;
                self.dispatcher.evaluate(&left, &right, context)
            }
            Instruction::Logical(op) => {
                let (left, right) = self.pop_pair()?;
                eval_logical(*op, &left, &right)
            }
            Instruction::Not => {
                let operand = self.pop()?;
                eval_not(&operand)
            }
            Instruction::LoadVariable(name) => self.load_variable(name),
            Instruction::Call { function, arity } => {
                let args = self.pop_values(*arity)?;
                self.call(function, &args)
            }
            Instruction::MakeList(len) => {
                let items = self.pop_values(*len)?;
                Ok(Token::new(Value::List(items.into_iter().collect())))
            }
            Instruction::MakeMap(pairs) => {
                let flat = self.pop_values(pairs * 2)?;
                let mut flat = flat.into_iter();
                let mut entries = SmallVec::<[(Value, Value); 4]>::new();
                while let (Some(key), Some(value)) = (flat.next(), flat.next()) {
                    entries.push((key, value));
                }
                Ok(Token::new(Value::map_from(entries)))
            }
        }
    }

    fn load_variable(&self, name: &EcoString) -> Result<Token, EvalError> {
        match self.state.variables.resolve(name) {
            Some(value) => Ok(Token::new(value)),
            None if self.options.strict_variables => {
                Err(EvalError::UnresolvedVariable { name: name.clone() })
            }
            None => {
                debug!(variable = %name, "Variable not found, evaluating to null");
                Ok(Token::null())
            }
        }
    }

    fn call(&self, function: &FunctionName, args: &[Value]) -> Result<Token, EvalError> {
        let wrap = |source| EvalError::Function {
            function: function.as_str().into(),
            source,
        };
        let resolved = self.state.functions.resolve(function).map_err(wrap)?;
        resolved
            .apply(args, self.state.context)
            .map(Token::new)
            .map_err(wrap)
    }

    fn pop(&mut self) -> Result<Token, EvalError> {
        self.stack.pop().ok_or_else(underflow)
    }

    /// Pop two operands; the most recently pushed one is the right operand.
    fn pop_pair(&mut self) -> Result<(Token, Token), EvalError> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    /// Pop `n` operands as values, in push order.
    fn pop_values(&mut self, n: usize) -> Result<Args, EvalError> {
        let drained = self.stack.pop_n(n).ok_or_else(underflow)?;
        Ok(drained.map(Token::into_value).collect())
    }
}

fn underflow() -> EvalError {
    invalid_program("operand stack underflow".into())
}

fn invalid_program(message: crate::String) -> EvalError {
    EvalError::InvalidProgram {
        message: message.into(),
    }
}
